use crate::{ArtworkId, FetchFailure, ImageInfo, PageEnvelope, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// List end became visible: request the page after `current_page`.
    FetchNext,
    /// Load an explicit page, replacing the accumulated list.
    FetchPage(u32),
    /// User asked to jump to a page. Signed so out-of-range input can be reported.
    JumpToPage(i64),
    /// Engine returned a decoded page.
    PageLoaded {
        request_id: RequestId,
        envelope: PageEnvelope,
    },
    /// Engine gave up on a page request.
    PageFailed {
        request_id: RequestId,
        failure: FetchFailure,
    },
    /// User opened the detail view of an artwork.
    ArtworkOpened(ArtworkId),
    /// User left the detail view.
    ArtworkClosed,
    /// Engine finished loading an image rendition.
    ImageLoaded {
        artwork_id: ArtworkId,
        result: Result<ImageInfo, String>,
    },
}
