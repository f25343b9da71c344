use serde::{Deserialize, Serialize};

pub type ArtworkId = u64;

/// IIIF image service used when no other image base is configured.
pub const DEFAULT_IMAGE_BASE: &str = "https://www.artic.edu/iiif/2";

/// One catalog entry as served by the artworks endpoint.
///
/// Fields not listed here are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: ArtworkId,
    pub title: String,
    #[serde(default)]
    pub image_id: Option<String>,
}

impl ArtworkRecord {
    /// Derives the 843px-wide rendition URL, or `None` when the record has no image.
    pub fn image_url(&self, image_base: &str) -> Option<String> {
        let image_id = self.image_id.as_deref()?;
        Some(format!(
            "{}/{}/full/843,/0/default.jpg",
            image_base.trim_end_matches('/'),
            image_id
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
    pub total_pages: u32,
    pub current_page: u32,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// One decoded page of the catalog. Lives only until it is merged into state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEnvelope {
    #[serde(rename = "data")]
    pub items: Vec<ArtworkRecord>,
    pub pagination: PaginationInfo,
}

/// What the image loader learned about a fetched rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Ready(ImageInfo),
    Failed(String),
}
