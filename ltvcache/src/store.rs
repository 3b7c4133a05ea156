//! CacheStore: atomic read/write of the catalog snapshot and favorites

use crate::Result;
use ltvcatalog::{Channel, ChannelIdentity, Playlist};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CATALOG_FILE: &str = "catalog.json";
const FAVORITES_FILE: &str = "favorites.json";

/// Durable store for the merged catalog and the favorites list.
///
/// The store is the single writer for both records: catalog writes happen
/// at the end of a successful fetch cycle, favorites writes happen on
/// every favorite toggle. Readers may observe the previous record while a
/// write is in flight; the rename keeps every observation whole.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.dir
    }

    /// Reads the last catalog snapshot.
    ///
    /// Returns `None` when no snapshot exists or when the record cannot
    /// be deserialized; corruption never propagates past this boundary.
    pub fn read_catalog(&self) -> Option<Playlist> {
        self.read_record(CATALOG_FILE)
    }

    /// Overwrites the catalog snapshot.
    ///
    /// The Favorites category is derived from `favorites.json` and is
    /// stripped before writing so it is never stored twice.
    pub fn write_catalog(&self, playlist: &Playlist) -> Result<()> {
        self.write_record(CATALOG_FILE, &playlist.without_favorites())
    }

    /// True when a readable snapshot is available for fallback.
    pub fn has_catalog(&self) -> bool {
        self.read_catalog().is_some()
    }

    /// Reads the persisted favorites, oldest first.
    ///
    /// Missing or unreadable records yield the empty list.
    pub fn read_favorites(&self) -> Vec<ChannelIdentity> {
        self.read_record(FAVORITES_FILE).unwrap_or_default()
    }

    /// Resolves every persisted favorite against a freshly merged
    /// catalog, dropping identities that no longer resolve.
    ///
    /// The category is ignored on purpose: a favorited channel may move
    /// between categories from one fetch cycle to the next. Returns
    /// `None` when nothing resolves, so an empty Favorites group is
    /// never rendered.
    pub fn trim_not_exist_from(&self, playlist: &Playlist) -> Option<Vec<Channel>> {
        let resolved: Vec<Channel> = self
            .read_favorites()
            .iter()
            .filter_map(|identity| playlist.find_channel(identity).cloned())
            .collect();

        if resolved.is_empty() {
            None
        } else {
            Some(resolved)
        }
    }

    /// Adds a channel to the favorites, re-persisting immediately.
    ///
    /// A channel already favorited moves to the end instead of being
    /// duplicated.
    pub fn insert_or_update_favorite(&self, channel: &Channel) -> Result<()> {
        let identity = channel.identity();
        let mut favorites = self.read_favorites();
        favorites.retain(|f| f != &identity);
        favorites.push(identity);
        self.write_record(FAVORITES_FILE, &favorites)
    }

    /// Removes a channel from the favorites, re-persisting immediately.
    /// No-op when the identity is not favorited.
    pub fn remove_favorite(&self, identity: &ChannelIdentity) -> Result<()> {
        let mut favorites = self.read_favorites();
        let before = favorites.len();
        favorites.retain(|f| f != identity);
        if favorites.len() == before {
            return Ok(());
        }
        self.write_record(FAVORITES_FILE, &favorites)
    }

    pub fn is_favorite(&self, identity: &ChannelIdentity) -> bool {
        self.read_favorites().iter().any(|f| f == identity)
    }

    fn read_record<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(record = file, error = %err, "Cache record not readable, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(record = file, error = %err, "Cache record corrupt, treating as miss");
                None
            }
        }
    }

    /// Writes the serialized record next to its target, then renames it
    /// into place. The rename keeps a crash mid-write from ever exposing
    /// a truncated record.
    fn write_record<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));

        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
