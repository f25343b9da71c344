use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gallery_core::{ArtworkId, RequestId};
use gallery_logging::{gallery_debug, gallery_error};

use crate::fetch::{CatalogSource, FetchSettings, ReqwestCatalogSource};
use crate::{EngineEvent, EngineStopped};

enum EngineCommand {
    FetchPage { request_id: RequestId, page: u32 },
    FetchImage { artwork_id: ArtworkId, url: String },
}

/// Runs catalog requests on a background tokio runtime and reports completions.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_source(Arc::new(ReqwestCatalogSource::new(settings)))
    }

    pub fn with_source(source: Arc<dyn CatalogSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    gallery_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
            gallery_debug!("engine command channel closed; shutting down runtime");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_page(&self, request_id: RequestId, page: u32) -> Result<(), EngineStopped> {
        self.cmd_tx
            .send(EngineCommand::FetchPage { request_id, page })
            .map_err(|_| EngineStopped)
    }

    pub fn fetch_image(
        &self,
        artwork_id: ArtworkId,
        url: impl Into<String>,
    ) -> Result<(), EngineStopped> {
        self.cmd_tx
            .send(EngineCommand::FetchImage {
                artwork_id,
                url: url.into(),
            })
            .map_err(|_| EngineStopped)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// A handle whose worker has already gone away.
    #[cfg(test)]
    pub(crate) fn stopped() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_event_tx, event_rx) = mpsc::channel();
        drop(cmd_rx);
        Self { cmd_tx, event_rx }
    }
}

async fn handle_command(
    source: &dyn CatalogSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage { request_id, page } => EngineEvent::PageFetched {
            request_id,
            page,
            result: source.fetch_page(page).await,
        },
        EngineCommand::FetchImage { artwork_id, url } => EngineEvent::ImageFetched {
            artwork_id,
            result: source.fetch_image(&url).await,
        },
    };
    let _ = event_tx.send(event);
}
