//! Error handling for the resume reviewer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ReviewerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ReviewerError {
    fn from(err: anyhow::Error) -> Self {
        ReviewerError::Internal(format!("{:#}", err))
    }
}
