//! Playlist: ordered categories with merge, sort, trim and Favorites ops

use crate::{Category, Channel, ChannelIdentity, FAVORITES_CATEGORY};
use serde::{Deserialize, Serialize};

/// An ordered sequence of categories.
///
/// One instance serves both as a single source's parse result and as the
/// merged catalog handed to the UI layer. Instances are built fresh on
/// every fetch cycle; only the cache snapshot outlives a cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Playlist {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Appends another playlist's categories into this one.
    ///
    /// A category whose name is already present has its channels
    /// concatenated onto the existing entry (first-seen category record
    /// wins); anything else is appended in arrival order. Channels are
    /// never de-duplicated: a channel present in two sources stays
    /// present twice.
    pub fn merge_with(&mut self, other: Playlist) {
        for category in other.categories {
            match self
                .categories
                .iter_mut()
                .find(|c| c.name == category.name)
            {
                Some(existing) => existing.channels.extend(category.channels),
                None => self.categories.push(category),
            }
        }
    }

    /// Sorts categories by case-normalized name, stable for equal keys.
    /// A Favorites category at index 0 is exempt and stays first.
    pub fn sort_categories(&mut self) {
        let start = self.favorites_offset();
        self.categories[start..]
            .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }

    /// Sorts every category's channels by case-normalized name, stable
    /// for equal keys. The Favorites category keeps its pinned order.
    pub fn sort_channels(&mut self) {
        for category in &mut self.categories {
            if category.is_favorites() {
                continue;
            }
            category
                .channels
                .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }

    /// Removes every channel without a playable stream URL, then every
    /// category emptied by that removal. Favorites is rebuilt from
    /// persisted identities elsewhere, so it is kept even when emptied.
    pub fn trim_empty_stream_urls(&mut self) {
        for category in &mut self.categories {
            category.channels.retain(Channel::is_playable);
        }
        self.categories
            .retain(|c| !c.channels.is_empty() || c.is_favorites());
    }

    /// Places the Favorites category at index 0 with the given channels,
    /// replacing any previous one. An empty list removes it instead: an
    /// empty Favorites group is never shown.
    pub fn insert_favorites(&mut self, channels: Vec<Channel>) {
        self.remove_favorites();
        if channels.is_empty() {
            return;
        }
        self.categories
            .insert(0, Category::with_channels(FAVORITES_CATEGORY, channels));
    }

    /// Removes the Favorites category if present, no-op otherwise.
    pub fn remove_favorites(&mut self) {
        self.categories.retain(|c| !c.is_favorites());
    }

    pub fn is_categories_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Looks a channel up by identity across all non-Favorites
    /// categories. The category is deliberately ignored: a channel may
    /// move between categories from one fetch to the next.
    pub fn find_channel(&self, identity: &ChannelIdentity) -> Option<&Channel> {
        self.categories
            .iter()
            .filter(|c| !c.is_favorites())
            .flat_map(|c| c.channels.iter())
            .find(|ch| ch.matches(identity))
    }

    /// Returns this playlist without its Favorites category.
    ///
    /// Favorites is derived state; the cache snapshot must not store it
    /// a second time.
    pub fn without_favorites(&self) -> Playlist {
        Playlist {
            categories: self
                .categories
                .iter()
                .filter(|c| !c.is_favorites())
                .cloned()
                .collect(),
        }
    }

    fn favorites_offset(&self) -> usize {
        usize::from(self.categories.first().is_some_and(Category::is_favorites))
    }
}
