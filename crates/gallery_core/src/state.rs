use std::collections::BTreeMap;

use crate::model::DEFAULT_IMAGE_BASE;
use crate::view_model::{ArtworkDetailView, ArtworkRow, CatalogViewModel, ImageView};
use crate::{ArtworkId, ArtworkRecord, ImageInfo, ImageState, PageEnvelope};

pub type RequestId = u64;

/// How a completed page is merged into the accumulated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Append,
    Replace,
}

/// The single page request allowed in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub request_id: RequestId,
    pub page: u32,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    items: Vec<ArtworkRecord>,
    current_page: u32,
    total_pages: u32,
    start_page: u32,
    total_items: u64,
    in_flight: Option<PendingFetch>,
    next_request_id: RequestId,
    selected: Option<ArtworkId>,
    images: BTreeMap<ArtworkId, ImageState>,
    image_base: String,
    dirty: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::with_image_base(DEFAULT_IMAGE_BASE)
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_base(image_base: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            start_page: 1,
            total_items: 0,
            in_flight: None,
            next_request_id: 1,
            selected: None,
            images: BTreeMap::new(),
            image_base: image_base.into(),
            dirty: false,
        }
    }

    pub fn items(&self) -> &[ArtworkRecord] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<PendingFetch> {
        self.in_flight
    }

    pub fn image_base(&self) -> &str {
        &self.image_base
    }

    pub fn image_state(&self, artwork_id: ArtworkId) -> Option<&ImageState> {
        self.images.get(&artwork_id)
    }

    pub fn find_artwork(&self, artwork_id: ArtworkId) -> Option<&ArtworkRecord> {
        self.items.iter().find(|artwork| artwork.id == artwork_id)
    }

    /// Returns whether observable state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> CatalogViewModel {
        CatalogViewModel {
            rows: self
                .items
                .iter()
                .map(|artwork| ArtworkRow {
                    id: artwork.id,
                    title: artwork.title.clone(),
                    has_image: artwork.image_id.is_some(),
                })
                .collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            start_page: self.start_page,
            total_items: self.total_items,
            is_loading: self.is_loading(),
            has_more: self.current_page < self.total_pages,
            detail: self.selected.and_then(|id| self.detail_view(id)),
        }
    }

    fn detail_view(&self, artwork_id: ArtworkId) -> Option<ArtworkDetailView> {
        let artwork = self.find_artwork(artwork_id)?;
        let image = match artwork.image_url(&self.image_base) {
            None => ImageView::Unavailable,
            Some(url) => match self.images.get(&artwork_id) {
                None | Some(ImageState::Pending) => ImageView::Loading { url },
                Some(ImageState::Ready(info)) => ImageView::Loaded {
                    url,
                    content_type: info.content_type.clone(),
                    byte_len: info.byte_len,
                },
                Some(ImageState::Failed(message)) => ImageView::Failed {
                    url,
                    message: message.clone(),
                },
            },
        };
        Some(ArtworkDetailView {
            id: artwork.id,
            title: artwork.title.clone(),
            image,
        })
    }

    /// Idle -> Fetching. Returns `None` when a fetch is already in flight.
    pub(crate) fn begin_fetch(&mut self, page: u32, mode: FetchMode) -> Option<PendingFetch> {
        if self.in_flight.is_some() {
            return None;
        }
        let pending = PendingFetch {
            request_id: self.next_request_id,
            page,
            mode,
        };
        self.next_request_id += 1;
        self.in_flight = Some(pending);
        self.dirty = true;
        Some(pending)
    }

    /// Fetching -> Idle for the matching request; stale ids are ignored.
    pub(crate) fn finish_fetch(&mut self, request_id: RequestId) -> Option<PendingFetch> {
        match self.in_flight {
            Some(pending) if pending.request_id == request_id => {
                self.in_flight = None;
                self.dirty = true;
                Some(pending)
            }
            _ => None,
        }
    }

    pub(crate) fn merge_page(&mut self, mode: FetchMode, envelope: PageEnvelope) {
        match mode {
            FetchMode::Append => self.items.extend(envelope.items),
            FetchMode::Replace => {
                self.items = envelope.items;
                self.forget_unlisted();
            }
        }
        self.current_page = envelope.pagination.current_page;
        self.total_pages = envelope.pagination.total_pages;
        self.total_items = envelope.pagination.total;
        self.dirty = true;
    }

    pub(crate) fn reset_for_jump(&mut self, page: u32) {
        self.items.clear();
        self.forget_unlisted();
        self.start_page = page;
        self.current_page = page;
        self.dirty = true;
    }

    /// Drops the selection and image states of artworks no longer in `items`.
    fn forget_unlisted(&mut self) {
        self.selected = None;
        let items = &self.items;
        self.images
            .retain(|id, _| items.iter().any(|artwork| artwork.id == *id));
    }

    pub(crate) fn select(&mut self, artwork_id: Option<ArtworkId>) {
        if self.selected != artwork_id {
            self.selected = artwork_id;
            self.dirty = true;
        }
    }

    /// Marks the image as pending. Returns `false` if it already was.
    pub(crate) fn begin_image(&mut self, artwork_id: ArtworkId) -> bool {
        if matches!(self.images.get(&artwork_id), Some(ImageState::Pending)) {
            return false;
        }
        self.images.insert(artwork_id, ImageState::Pending);
        self.dirty = true;
        true
    }

    pub(crate) fn finish_image(&mut self, artwork_id: ArtworkId, result: Result<ImageInfo, String>) {
        // The list moved on while the image was loading.
        if self.find_artwork(artwork_id).is_none() {
            return;
        }
        let next = match result {
            Ok(info) => ImageState::Ready(info),
            Err(message) => ImageState::Failed(message),
        };
        self.images.insert(artwork_id, next);
        self.dirty = true;
    }
}
