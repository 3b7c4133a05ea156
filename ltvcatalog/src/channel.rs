//! Channel: a single named stream entry

use serde::{Deserialize, Serialize};

fn default_can_favorite() -> bool {
    true
}

/// A single channel as delivered by a playlist source.
///
/// A channel is owned by exactly one category; the synthetic Favorites
/// category holds clones resolved by identity, never the originals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default = "default_can_favorite")]
    pub can_favorite: bool,
}

impl Channel {
    pub fn new(name: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo: None,
            stream_url: Some(stream_url.into()),
            group: None,
            can_favorite: true,
        }
    }

    /// A channel without a stream URL (or with a blank one) cannot be played.
    pub fn is_playable(&self) -> bool {
        self.stream_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Stable identity key: name + stream URL.
    ///
    /// Positions inside the catalog are not stable across fetch cycles,
    /// so favorites are persisted and resolved through this key.
    pub fn identity(&self) -> ChannelIdentity {
        ChannelIdentity {
            name: self.name.clone(),
            stream_url: self.stream_url.clone(),
        }
    }

    pub fn matches(&self, identity: &ChannelIdentity) -> bool {
        self.name == identity.name && self.stream_url == identity.stream_url
    }
}

/// Persisted pointer to a channel, portable across fetch cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelIdentity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}
