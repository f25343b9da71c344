//! Gallery core: catalog data model, pure pagination state machine and view-model helpers.
mod effect;
mod error;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{parse_page_input, CatalogError, FetchFailure};
pub use model::{
    ArtworkId, ArtworkRecord, ImageInfo, ImageState, PageEnvelope, PaginationInfo,
    DEFAULT_IMAGE_BASE,
};
pub use msg::Msg;
pub use state::{CatalogState, FetchMode, PendingFetch, RequestId};
pub use update::update;
pub use view_model::{ArtworkDetailView, ArtworkRow, CatalogViewModel, ImageView};
