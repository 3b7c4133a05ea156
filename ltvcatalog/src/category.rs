//! Category: a named, ordered list of channels

use crate::Channel;
use serde::{Deserialize, Serialize};

/// Reserved name of the synthetic Favorites category.
///
/// The Favorites category is derived from persisted identities, always
/// occupies index 0 when present, and is never serialized into the
/// catalog snapshot.
pub const FAVORITES_CATEGORY: &str = "Favorites";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: Vec::new(),
        }
    }

    pub fn with_channels(name: impl Into<String>, channels: Vec<Channel>) -> Self {
        Self {
            name: name.into(),
            channels,
        }
    }

    pub fn is_favorites(&self) -> bool {
        self.name == FAVORITES_CATEGORY
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
