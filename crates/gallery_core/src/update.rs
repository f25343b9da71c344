use crate::{CatalogError, CatalogState, Effect, FetchMode, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: CatalogState, msg: Msg) -> (CatalogState, Vec<Effect>) {
    let effects = match msg {
        Msg::FetchNext => {
            let page = state.current_page().saturating_add(1);
            request_page(&mut state, page, FetchMode::Append)
        }
        Msg::FetchPage(page) => {
            if page == 0 {
                vec![invalid_page(&state, "0".to_string())]
            } else {
                request_page(&mut state, page, FetchMode::Replace)
            }
        }
        Msg::JumpToPage(target) => match u32::try_from(target) {
            Ok(page) if (1..=state.total_pages()).contains(&page) => {
                // A jump while a fetch is in flight still resets the list;
                // the replacement fetch is then dropped by the guard.
                state.reset_for_jump(page);
                request_page(&mut state, page, FetchMode::Replace)
            }
            _ => vec![invalid_page(&state, target.to_string())],
        },
        Msg::PageLoaded {
            request_id,
            envelope,
        } => {
            if let Some(pending) = state.finish_fetch(request_id) {
                state.merge_page(pending.mode, envelope);
            }
            Vec::new()
        }
        Msg::PageFailed {
            request_id,
            failure,
        } => match state.finish_fetch(request_id) {
            Some(pending) => vec![Effect::Report(failure.into_error(pending.page))],
            None => Vec::new(),
        },
        Msg::ArtworkOpened(artwork_id) => {
            let image_url = state
                .find_artwork(artwork_id)
                .map(|artwork| artwork.image_url(state.image_base()));
            match image_url {
                // Not in the current list.
                None => Vec::new(),
                Some(url) => {
                    state.select(Some(artwork_id));
                    match url {
                        Some(url) if state.begin_image(artwork_id) => {
                            vec![Effect::FetchImage { artwork_id, url }]
                        }
                        _ => Vec::new(),
                    }
                }
            }
        }
        Msg::ArtworkClosed => {
            state.select(None);
            Vec::new()
        }
        Msg::ImageLoaded { artwork_id, result } => {
            let report = result.as_ref().err().map(|message| {
                Effect::Report(CatalogError::Image {
                    artwork_id,
                    message: message.clone(),
                })
            });
            state.finish_image(artwork_id, result);
            report.into_iter().collect()
        }
    };

    (state, effects)
}

fn request_page(state: &mut CatalogState, page: u32, mode: FetchMode) -> Vec<Effect> {
    match state.begin_fetch(page, mode) {
        Some(pending) => vec![Effect::FetchPage {
            request_id: pending.request_id,
            page: pending.page,
        }],
        // Single-flight: dropped, not queued.
        None => Vec::new(),
    }
}

fn invalid_page(state: &CatalogState, requested: String) -> Effect {
    Effect::Report(CatalogError::InvalidPage {
        requested,
        total_pages: state.total_pages(),
    })
}
