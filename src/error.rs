#[derive(Debug, thiserror::Error)]
pub enum ScryfallError {
    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Unknown record tag: {0:?}")]
    UnknownRecordTag(String),

    #[error("Field mismatch decoding '{tag}': {message}")]
    FieldMismatch { tag: String, message: String },

    #[error("Pagination error: {0}")]
    Pagination(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ScryfallError {
    /// HTTP status code for [`ScryfallError::HttpStatus`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScryfallError::HttpStatus { status, .. } => Some(*status),
            ScryfallError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for the decode-time errors the list resolver skips over.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ScryfallError::UnknownRecordTag(_) | ScryfallError::FieldMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScryfallError>;
