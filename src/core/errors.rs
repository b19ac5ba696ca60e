use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(Box<reqwest::Error>),

    #[error("Backend returned {status} for {url}")]
    Backend { status: u16, url: String },

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("Invalid image payload: {0}")]
    InvalidImagePayload(String),

    #[error("Invalid reading progress for entry {id}: page {current_page} of {total_pages}")]
    InvalidProgress { id: String, current_page: u32, total_pages: u32 },

    #[error("LibrisError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LibrisError {
    fn from(error: std::io::Error) -> Self {
        LibrisError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for LibrisError {
    fn from(error: reqwest::Error) -> Self {
        LibrisError::Http(Box::new(error))
    }
}
