use gallery_core::PageEnvelope;
use serde_json::error::Category;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is not valid JSON at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("response does not match the artworks page shape at line {line}, column {column}: {message}")]
    Shape {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Decode an artworks page body. Unknown fields are ignored.
pub fn decode_page(bytes: &[u8]) -> Result<PageEnvelope, DecodeError> {
    serde_json::from_slice(bytes).map_err(|err| {
        let (line, column, message) = (err.line(), err.column(), err.to_string());
        match err.classify() {
            Category::Data => DecodeError::Shape {
                line,
                column,
                message,
            },
            Category::Syntax | Category::Eof | Category::Io => DecodeError::Malformed {
                line,
                column,
                message,
            },
        }
    })
}
