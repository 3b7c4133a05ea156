//! Error types for playlist source fetching

/// Result type alias for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised while fetching a source payload.
///
/// Every variant is a transport-level failure: the origin could not be
/// reached or did not hand back a payload. A payload that arrives but
/// cannot be parsed is not an error here; it surfaces as a null
/// response so callers can tell the two situations apart.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (connect, timeout, invalid URL, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
}

impl SourceError {
    pub fn kind(&self) -> SourceErrorKind {
        SourceErrorKind::Transport
    }
}

/// Coarse failure classification reported to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Source unreachable: connect failure, timeout, bad status, IO error
    Transport,
    /// Source reachable but its payload could not be parsed
    Parse,
}

impl std::fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceErrorKind::Transport => write!(f, "transport"),
            SourceErrorKind::Parse => write!(f, "parse"),
        }
    }
}
