use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Unreadable(String),

    #[error("Could not detect image format")]
    UnknownFormat,

    #[error("Unsupported image format: {0}. Allowed: JPEG, PNG")]
    UnsupportedFormat(String),

    #[error("Image too large: {size} bytes (max {limit})")]
    TooLarge { size: usize, limit: usize },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session is not awaiting an answer")]
    NotAwaitingAnswer,

    #[error(transparent)]
    Llm(#[from] LlmError),
}
