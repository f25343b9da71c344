use crate::ArtworkId;

/// Failures the coordinator reports to its observer. None of them are fatal.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid page {requested:?}: expected a number between 1 and {total_pages}")]
    InvalidPage { requested: String, total_pages: u32 },
    #[error("transport error fetching page {page}: {message}")]
    Transport { page: u32, message: String },
    #[error("decode error for page {page}: {message}")]
    Decode { page: u32, message: String },
    #[error("image for artwork {artwork_id} unavailable: {message}")]
    Image { artwork_id: ArtworkId, message: String },
}

/// Why a page fetch did not produce an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Transport(String),
    Decode(String),
}

impl FetchFailure {
    pub(crate) fn into_error(self, page: u32) -> CatalogError {
        match self {
            FetchFailure::Transport(message) => CatalogError::Transport { page, message },
            FetchFailure::Decode(message) => CatalogError::Decode { page, message },
        }
    }
}

/// Parses user-typed page input into a page number in `1..=total_pages`.
pub fn parse_page_input(input: &str, total_pages: u32) -> Result<u32, CatalogError> {
    let invalid = || CatalogError::InvalidPage {
        requested: input.to_string(),
        total_pages,
    };
    let page: u32 = input.trim().parse().map_err(|_| invalid())?;
    if page == 0 || page > total_pages {
        return Err(invalid());
    }
    Ok(page)
}
