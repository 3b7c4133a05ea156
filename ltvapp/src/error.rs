//! Error types for ltvapp

/// Coordinator-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cache error: {0}")]
    Cache(#[from] ltvcache::Error),

    #[error("Source error: {0}")]
    Source(#[from] ltvsources::SourceError),

    #[error("Channel cannot be favorited: {0}")]
    NotFavoritable(String),
}

/// Specialized Result type for ltvapp
pub type Result<T> = std::result::Result<T, Error>;
