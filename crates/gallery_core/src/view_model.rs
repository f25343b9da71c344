use crate::ArtworkId;

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogViewModel {
    pub rows: Vec<ArtworkRow>,
    pub current_page: u32,
    pub total_pages: u32,
    pub start_page: u32,
    pub total_items: u64,
    pub is_loading: bool,
    /// Whether the list end shows a "load more" placeholder.
    pub has_more: bool,
    pub detail: Option<ArtworkDetailView>,
}

impl CatalogViewModel {
    pub fn page_range_label(&self) -> String {
        format!(
            "Pages from: {} to {}  (total pages: {})",
            self.start_page, self.current_page, self.total_pages
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRow {
    pub id: ArtworkId,
    pub title: String,
    pub has_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkDetailView {
    pub id: ArtworkId,
    pub title: String,
    pub image: ImageView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageView {
    Unavailable,
    Loading {
        url: String,
    },
    Loaded {
        url: String,
        content_type: Option<String>,
        byte_len: u64,
    },
    Failed {
        url: String,
        message: String,
    },
}
