use std::time::{Duration, Instant};

use gallery_core::{update, CatalogState, CatalogViewModel, Effect, FetchFailure, Msg};
use gallery_logging::{gallery_debug, gallery_error, gallery_info, gallery_warn};

use crate::{EngineEvent, EngineHandle, FetchError};

pub type Subscriber = Box<dyn FnMut(&CatalogViewModel) + Send>;

/// Owns the catalog state and drives it: messages go through `update`,
/// effects go to the engine, completions come back as messages.
///
/// Subscribers are called with a fresh view after every dispatch that
/// changed observable state.
pub struct Coordinator {
    state: CatalogState,
    engine: EngineHandle,
    subscribers: Vec<Subscriber>,
}

impl Coordinator {
    pub fn new(engine: EngineHandle) -> Self {
        Self::with_state(engine, CatalogState::new())
    }

    pub fn with_state(engine: EngineHandle, state: CatalogState) -> Self {
        Self {
            state,
            engine,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&CatalogViewModel) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn view(&self) -> CatalogViewModel {
        self.state.view()
    }

    pub fn fetch_next(&mut self) {
        self.dispatch(Msg::FetchNext);
    }

    pub fn fetch_page(&mut self, page: u32) {
        self.dispatch(Msg::FetchPage(page));
    }

    pub fn jump_to_page(&mut self, target: i64) {
        self.dispatch(Msg::JumpToPage(target));
    }

    pub fn open_artwork(&mut self, artwork_id: gallery_core::ArtworkId) {
        self.dispatch(Msg::ArtworkOpened(artwork_id));
    }

    pub fn close_artwork(&mut self) {
        self.dispatch(Msg::ArtworkClosed);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        self.state = state;

        let follow_ups = self.run_effects(effects);

        if changed {
            let view = self.state.view();
            for subscriber in &mut self.subscribers {
                subscriber(&view);
            }
        }

        for msg in follow_ups {
            self.dispatch(msg);
        }
    }

    /// Dispatch every completion the engine has ready. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.engine.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Block until no page fetch is in flight, or `timeout` elapses.
    ///
    /// Image completions arriving meanwhile are dispatched too.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.engine.recv_timeout(remaining) {
                Some(event) => self.handle_event(event),
                None => return !self.state.is_loading(),
            }
        }
        true
    }

    fn handle_event(&mut self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::PageFetched {
                request_id,
                page,
                result,
            } => match result {
                Ok(envelope) => {
                    gallery_info!(
                        "Request for page {} completed successfully ({} artworks).",
                        page,
                        envelope.items.len()
                    );
                    Msg::PageLoaded {
                        request_id,
                        envelope,
                    }
                }
                Err(err) => Msg::PageFailed {
                    request_id,
                    failure: map_failure(err),
                },
            },
            EngineEvent::ImageFetched { artwork_id, result } => {
                if let Ok(info) = &result {
                    gallery_debug!(
                        "Image for artwork {} loaded: {} bytes",
                        artwork_id,
                        info.byte_len
                    );
                }
                Msg::ImageLoaded {
                    artwork_id,
                    result: result.map_err(|err| err.to_string()),
                }
            }
        };
        self.dispatch(msg);
    }

    /// Hands effects to the engine. Requests the engine could not accept
    /// come back as failure messages so the fetch guard is released.
    fn run_effects(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchPage { request_id, page } => {
                    gallery_info!("FetchPage request_id={} page={}", request_id, page);
                    if let Err(err) = self.engine.fetch_page(request_id, page) {
                        gallery_error!("FetchPage request_id={} not sent: {}", request_id, err);
                        follow_ups.push(Msg::PageFailed {
                            request_id,
                            failure: FetchFailure::Transport(err.to_string()),
                        });
                    }
                }
                Effect::FetchImage { artwork_id, url } => {
                    gallery_debug!("FetchImage artwork_id={} url={}", artwork_id, url);
                    if let Err(err) = self.engine.fetch_image(artwork_id, url) {
                        gallery_error!("FetchImage artwork_id={} not sent: {}", artwork_id, err);
                        follow_ups.push(Msg::ImageLoaded {
                            artwork_id,
                            result: Err(err.to_string()),
                        });
                    }
                }
                Effect::Report(err) => {
                    gallery_warn!("{}", err);
                }
            }
        }
        follow_ups
    }
}

fn map_failure(err: FetchError) -> FetchFailure {
    let message = err.to_string();
    if err.is_transport() {
        FetchFailure::Transport(message)
    } else {
        FetchFailure::Decode(message)
    }
}
