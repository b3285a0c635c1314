use thiserror::Error;

/// Failures raised by a document store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("invalid title pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
