//! JSON playlist document parser

use super::PlaylistParser;
use ltvcatalog::Playlist;

/// Parses the native JSON playlist document: a top-level object with a
/// `categories` array of `{name, channels}` entries.
///
/// The `categories` key is required even when empty; without that check
/// any JSON object would deserialize into an empty playlist and mask a
/// malformed source.
pub struct JsonParser;

impl PlaylistParser for JsonParser {
    fn parse(&self, text: &str) -> Option<Playlist> {
        let value: serde_json::Value = serde_json::from_str(text).ok()?;
        value.as_object()?.get("categories")?.as_array()?;
        serde_json::from_value(value).ok()
    }
}
