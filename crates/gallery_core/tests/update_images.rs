use gallery_core::{
    update, ArtworkRecord, CatalogError, CatalogState, Effect, ImageInfo, ImageState, ImageView,
    Msg, PageEnvelope, PaginationInfo,
};

fn with_artworks() -> CatalogState {
    let (state, effects) = update(
        CatalogState::with_image_base("https://images.example.test/iiif/2"),
        Msg::FetchPage(1),
    );
    let Some(Effect::FetchPage { request_id, .. }) = effects.first().cloned() else {
        panic!("expected FetchPage, got {effects:?}");
    };
    let envelope = PageEnvelope {
        items: vec![
            ArtworkRecord {
                id: 16487,
                title: "The Bay of Marseille".to_string(),
                image_id: Some("d4ca6321".to_string()),
            },
            ArtworkRecord {
                id: 900,
                title: "Untitled fragment".to_string(),
                image_id: None,
            },
        ],
        pagination: PaginationInfo {
            total: 2,
            limit: 12,
            offset: 0,
            total_pages: 1,
            current_page: 1,
            next_url: None,
        },
    };
    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            envelope,
        },
    );
    state.consume_dirty();
    state
}

const IMAGE_URL: &str = "https://images.example.test/iiif/2/d4ca6321/full/843,/0/default.jpg";

#[test]
fn opening_artwork_with_image_requests_rendition() {
    let state = with_artworks();

    let (state, effects) = update(state, Msg::ArtworkOpened(16487));

    assert_eq!(
        effects,
        vec![Effect::FetchImage {
            artwork_id: 16487,
            url: IMAGE_URL.to_string(),
        }]
    );
    let detail = state.view().detail.expect("detail view");
    assert_eq!(detail.title, "The Bay of Marseille");
    assert_eq!(
        detail.image,
        ImageView::Loading {
            url: IMAGE_URL.to_string()
        }
    );
}

#[test]
fn reopening_while_pending_does_not_refetch() {
    let state = with_artworks();
    let (state, _) = update(state, Msg::ArtworkOpened(16487));
    let (state, _) = update(state, Msg::ArtworkClosed);

    let (state, effects) = update(state, Msg::ArtworkOpened(16487));

    assert!(effects.is_empty());
    assert!(state.view().detail.is_some());
}

#[test]
fn artwork_without_image_shows_fallback() {
    let state = with_artworks();

    let (state, effects) = update(state, Msg::ArtworkOpened(900));

    assert!(effects.is_empty());
    assert_eq!(
        state.view().detail.map(|detail| detail.image),
        Some(ImageView::Unavailable)
    );
}

#[test]
fn unknown_artwork_is_ignored() {
    let state = with_artworks();
    let before = state.clone();

    let (state, effects) = update(state, Msg::ArtworkOpened(1));

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn image_results_update_detail_view() {
    let state = with_artworks();
    let (state, _) = update(state, Msg::ArtworkOpened(16487));

    let (state, effects) = update(
        state,
        Msg::ImageLoaded {
            artwork_id: 16487,
            result: Ok(ImageInfo {
                url: IMAGE_URL.to_string(),
                content_type: Some("image/jpeg".to_string()),
                byte_len: 2048,
            }),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().detail.map(|detail| detail.image),
        Some(ImageView::Loaded {
            url: IMAGE_URL.to_string(),
            content_type: Some("image/jpeg".to_string()),
            byte_len: 2048,
        })
    );

    let (state, effects) = update(
        state,
        Msg::ImageLoaded {
            artwork_id: 16487,
            result: Err("http status 404".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Report(CatalogError::Image {
            artwork_id: 16487,
            message: "http status 404".to_string(),
        })]
    );
    assert!(matches!(
        state.view().detail.map(|detail| detail.image),
        Some(ImageView::Failed { .. })
    ));
}

#[test]
fn image_loading_does_not_touch_page_guard() {
    let state = with_artworks();
    let (state, _) = update(state, Msg::ArtworkOpened(16487));

    assert!(!state.is_loading());
    let (_, effects) = update(state, Msg::FetchPage(1));
    assert!(matches!(
        effects.as_slice(),
        [Effect::FetchPage { page: 1, .. }]
    ));
}

fn load(state: CatalogState, msg: Msg, envelope: PageEnvelope) -> CatalogState {
    let (state, effects) = update(state, msg);
    let Some(Effect::FetchPage { request_id, .. }) = effects.first().cloned() else {
        panic!("expected FetchPage, got {effects:?}");
    };
    update(
        state,
        Msg::PageLoaded {
            request_id,
            envelope,
        },
    )
    .0
}

fn two_page_envelope(current_page: u32, ids: &[u64]) -> PageEnvelope {
    PageEnvelope {
        items: ids
            .iter()
            .map(|&id| ArtworkRecord {
                id,
                title: format!("A{id}"),
                image_id: Some(format!("img-{id}")),
            })
            .collect(),
        pagination: PaginationInfo {
            total: 4,
            limit: 2,
            offset: u64::from(current_page - 1) * 2,
            total_pages: 2,
            current_page,
            next_url: None,
        },
    }
}

#[test]
fn jumping_away_and_back_does_not_reopen_old_detail() {
    let state = load(
        CatalogState::new(),
        Msg::FetchPage(1),
        two_page_envelope(1, &[10, 11]),
    );
    let (state, _) = update(state, Msg::ArtworkOpened(10));
    assert!(state.view().detail.is_some());

    let state = load(state, Msg::JumpToPage(2), two_page_envelope(2, &[20, 21]));
    assert_eq!(state.view().detail, None);
    assert_eq!(state.image_state(10), None);

    let state = load(state, Msg::JumpToPage(1), two_page_envelope(1, &[10, 11]));

    assert_eq!(state.view().detail, None);
    assert_eq!(state.image_state(10), None);
}

#[test]
fn replacing_the_list_keeps_only_listed_images() {
    let state = load(
        CatalogState::new(),
        Msg::FetchPage(1),
        two_page_envelope(1, &[10, 11]),
    );
    let (state, _) = update(state, Msg::ArtworkOpened(10));
    let (state, _) = update(state, Msg::ArtworkOpened(11));

    let state = load(state, Msg::FetchPage(2), two_page_envelope(2, &[11, 20]));

    assert_eq!(state.view().detail, None);
    assert_eq!(state.image_state(10), None);
    assert_eq!(state.image_state(11), Some(&ImageState::Pending));
}

#[test]
fn late_image_for_unlisted_artwork_is_dropped() {
    let state = load(
        CatalogState::new(),
        Msg::FetchPage(1),
        two_page_envelope(1, &[10, 11]),
    );
    let (state, _) = update(state, Msg::ArtworkOpened(10));
    let (state, _) = update(state, Msg::JumpToPage(2));

    let (state, _) = update(
        state,
        Msg::ImageLoaded {
            artwork_id: 10,
            result: Ok(ImageInfo {
                url: "https://www.artic.edu/iiif/2/img-10/full/843,/0/default.jpg".to_string(),
                content_type: Some("image/jpeg".to_string()),
                byte_len: 10,
            }),
        },
    );

    assert_eq!(state.image_state(10), None);
}
