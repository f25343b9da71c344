use std::time::Duration;

use futures_util::StreamExt;
use gallery_core::{ImageInfo, PageEnvelope, DEFAULT_IMAGE_BASE};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::decode::decode_page;
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Catalog API root; pages are read from `{base_url}/artworks?page=N`.
    pub base_url: String,
    /// IIIF image service root used to derive rendition URLs.
    pub image_base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_image_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            allowed_image_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }
}

/// Remote side of the catalog: one page or one image per call, no retries.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<PageEnvelope, FetchError>;

    async fn fetch_image(&self, url: &str) -> Result<ImageInfo, FetchError>;
}

/// Build `{base_url}/artworks?page={page}`.
pub fn page_url(base_url: &str, page: u32) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
        .pop_if_empty()
        .push("artworks");
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string());
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogSource {
    settings: FetchSettings,
}

impl ReqwestCatalogSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn is_image_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_image_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    /// GET `url`, failing on non-2xx, and return the response for body reading.
    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }
        Ok(response)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl CatalogSource for ReqwestCatalogSource {
    async fn fetch_page(&self, page: u32) -> Result<PageEnvelope, FetchError> {
        let url = page_url(&self.settings.base_url, page)?;
        let response = self.get(url.as_str()).await?;
        let bytes = self.read_body(response).await?;
        decode_page(&bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn fetch_image(&self, url: &str) -> Result<ImageInfo, FetchError> {
        Url::parse(url).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response = self.get(url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_image_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let bytes = self.read_body(response).await?;
        Ok(ImageInfo {
            url: url.to_string(),
            content_type,
            byte_len: bytes.len() as u64,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
