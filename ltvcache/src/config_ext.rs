//! Extension for resolving the cache directory through ltvconfig

use crate::CacheStore;
use anyhow::Result;
use ltvconfig::Config;

/// Default cache directory, relative to the configuration directory.
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Extension trait wiring the cache store into the configuration.
pub trait CacheConfigExt {
    /// Returns the configured cache directory, creating it on demand.
    ///
    /// Defaults to `cache` under the configuration directory and
    /// persists the default when not configured yet.
    fn get_catalog_cache_dir(&self) -> Result<std::path::PathBuf>;

    /// Opens a [`CacheStore`] rooted at the configured directory.
    fn catalog_cache_store(&self) -> Result<CacheStore>;
}

impl CacheConfigExt for Config {
    fn get_catalog_cache_dir(&self) -> Result<std::path::PathBuf> {
        self.get_managed_dir(&["host", "cache", "directory"], DEFAULT_CACHE_DIR)
    }

    fn catalog_cache_store(&self) -> Result<CacheStore> {
        Ok(CacheStore::new(self.get_catalog_cache_dir()?)?)
    }
}
