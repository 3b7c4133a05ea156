//! Extension for loading preferences and the last-watched bookmark

use crate::Preferences;
use anyhow::Result;
use ltvcatalog::ChannelIdentity;
use ltvconfig::Config;
use serde_yaml::Value;

/// Extension trait for the coordinator's configuration section.
pub trait PreferencesConfigExt {
    /// Loads the four viewing preferences.
    fn get_preferences(&self) -> Result<Preferences>;

    /// Returns the bookmarked channel, if any.
    fn get_last_watched(&self) -> Result<Option<ChannelIdentity>>;

    /// Stores the bookmarked channel.
    fn set_last_watched(&self, identity: &ChannelIdentity) -> Result<()>;
}

impl PreferencesConfigExt for Config {
    fn get_preferences(&self) -> Result<Preferences> {
        Ok(Preferences {
            sort_category: self.get_sort_category()?,
            sort_channel: self.get_sort_channel()?,
            sort_favorite: self.get_sort_favorite()?,
            play_last_watched: self.get_play_last_watched()?,
        })
    }

    fn get_last_watched(&self) -> Result<Option<ChannelIdentity>> {
        match self.get_value(&["preferences", "last_watched"]) {
            Ok(value @ Value::Mapping(_)) => Ok(serde_yaml::from_value(value).ok()),
            _ => Ok(None),
        }
    }

    fn set_last_watched(&self, identity: &ChannelIdentity) -> Result<()> {
        let value = serde_yaml::to_value(identity)?;
        self.set_value(&["preferences", "last_watched"], value)
    }
}
