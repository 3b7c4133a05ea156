//! Source descriptors: where a playlist comes from and how to read it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Expected payload format of a source.
///
/// `Auto` sniffs the payload and tries the remaining parsers on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Auto,
    M3u,
    Json,
}

/// Origin of a playlist payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
    /// Fetched over HTTP(S)
    Remote(String),
    /// Read from the local filesystem
    Local(PathBuf),
}

/// One configured playlist source.
///
/// Serializes as `{remote: "https://...", format: m3u}` or
/// `{local: "/path", format: json}` in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(flatten)]
    pub origin: SourceOrigin,
    #[serde(default)]
    pub format: SourceFormat,
}

impl SourceDescriptor {
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            origin: SourceOrigin::Remote(url.into()),
            format: SourceFormat::Auto,
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: SourceOrigin::Local(path.into()),
            format: SourceFormat::Auto,
        }
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            SourceOrigin::Remote(url) => write!(f, "{url}"),
            SourceOrigin::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
