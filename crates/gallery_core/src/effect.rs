#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage {
        request_id: crate::RequestId,
        page: u32,
    },
    FetchImage {
        artwork_id: crate::ArtworkId,
        url: String,
    },
    /// Hand a recovered failure to the observer (the log).
    Report(crate::CatalogError),
}
