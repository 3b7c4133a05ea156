//! # ltvcache - Durable catalog snapshot and favorites for LoungeTV
//!
//! Two independent records live under the cache directory:
//! - `catalog.json`: the last successfully merged catalog, with the
//!   derived Favorites category stripped
//! - `favorites.json`: the ordered list of favorited channel identities
//!   (name + stream URL pairs, portable across fetch cycles)
//!
//! Writes follow a write-temp-then-rename discipline so a crash mid-write
//! never leaves a half-written record. Unreadable records degrade to a
//! cache-miss instead of surfacing an error.
//!
//! # Example
//!
//! ```no_run
//! use ltvcache::CacheStore;
//! use ltvcatalog::Playlist;
//!
//! # fn main() -> ltvcache::Result<()> {
//! let store = CacheStore::new("/var/lib/loungetv/cache")?;
//!
//! if let Some(snapshot) = store.read_catalog() {
//!     println!("{} cached categories", snapshot.categories.len());
//! }
//!
//! store.write_catalog(&Playlist::default())?;
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

#[cfg(feature = "ltvconfig")]
mod config_ext;

pub use error::{Error, Result};
pub use store::CacheStore;

#[cfg(feature = "ltvconfig")]
pub use config_ext::CacheConfigExt;
