//! Error types for ltvcache

/// Cache persistence errors
///
/// Read-side corruption is not represented here: an unreadable record is
/// a cache-miss by design, not an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Specialized Result type for ltvcache
pub type Result<T> = std::result::Result<T, Error>;
