//! Gallery engine: catalog API client, worker runtime and the coordinator driving core state.
mod coordinator;
mod decode;
mod engine;
mod fetch;
mod types;

pub use coordinator::{Coordinator, Subscriber};
pub use decode::{decode_page, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{page_url, CatalogSource, FetchSettings, ReqwestCatalogSource, DEFAULT_BASE_URL};
pub use types::{EngineEvent, EngineStopped, FailureKind, FetchError};
