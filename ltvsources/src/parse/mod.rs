//! Playlist payload parsers
//!
//! Parsing is a seam: the reader only knows [`PlaylistParser`], concrete
//! formats plug in behind it. A parser returns `None` for a payload it
//! does not understand; deciding what that means (malformed source vs
//! wrong format guess) belongs to the caller.

mod json;
mod m3u;

pub use json::JsonParser;
pub use m3u::M3uParser;

use crate::SourceFormat;
use ltvcatalog::Playlist;

/// A format-specific playlist parser.
pub trait PlaylistParser: Send + Sync {
    /// Parses a payload into a playlist, `None` when the payload is not
    /// valid for this format.
    fn parse(&self, text: &str) -> Option<Playlist>;
}

/// Parses a payload according to the declared source format.
///
/// `Auto` sniffs the payload first and falls back to the remaining
/// parser, so a mislabeled-but-valid payload still loads.
pub fn parse_playlist(text: &str, format: SourceFormat) -> Option<Playlist> {
    match format {
        SourceFormat::M3u => M3uParser.parse(text),
        SourceFormat::Json => JsonParser.parse(text),
        SourceFormat::Auto => match sniff(text) {
            SourceFormat::Json => JsonParser.parse(text).or_else(|| M3uParser.parse(text)),
            _ => M3uParser.parse(text).or_else(|| JsonParser.parse(text)),
        },
    }
}

fn sniff(text: &str) -> SourceFormat {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        SourceFormat::Json
    } else {
        SourceFormat::M3u
    }
}
