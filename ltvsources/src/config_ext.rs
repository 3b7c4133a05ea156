//! Extension for storing the source list in ltvconfig

use crate::SourceDescriptor;
use anyhow::Result;
use ltvconfig::Config;
use serde_yaml::Value;

/// Extension trait for managing the configured playlist sources.
///
/// Sources live under `sources.playlists` in the configuration file, in
/// the order they should be reported in; fetching ignores that order.
pub trait SourcesConfigExt {
    /// Returns the configured playlist sources.
    ///
    /// Defaults to the empty list and persists the default when the key
    /// is missing or malformed.
    fn get_playlist_sources(&self) -> Result<Vec<SourceDescriptor>>;

    /// Replaces the configured playlist sources.
    fn set_playlist_sources(&self, sources: &[SourceDescriptor]) -> Result<()>;
}

impl SourcesConfigExt for Config {
    fn get_playlist_sources(&self) -> Result<Vec<SourceDescriptor>> {
        match self.get_value(&["sources", "playlists"]) {
            Ok(value @ Value::Sequence(_)) => match serde_yaml::from_value(value) {
                Ok(sources) => Ok(sources),
                Err(err) => {
                    tracing::warn!(error = %err, "Configured sources unreadable, resetting");
                    self.set_playlist_sources(&[])?;
                    Ok(Vec::new())
                }
            },
            _ => {
                self.set_playlist_sources(&[])?;
                Ok(Vec::new())
            }
        }
    }

    fn set_playlist_sources(&self, sources: &[SourceDescriptor]) -> Result<()> {
        let value = serde_yaml::to_value(sources)?;
        self.set_value(&["sources", "playlists"], value)
    }
}
