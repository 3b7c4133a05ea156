//! # ltvcatalog - Channel catalog model for LoungeTV
//!
//! This crate provides the entity graph shared by the whole workspace:
//! - **Channel**: a named stream with logo, group tag and favorite flag
//! - **Category**: a named, ordered list of channels
//! - **Playlist**: an ordered list of categories with merge/sort/trim
//!   operations and synthetic Favorites handling
//!
//! Everything here is pure data: no I/O, no async. Fetching, parsing and
//! persistence live in `ltvsources` and `ltvcache`.
//!
//! # Example
//!
//! ```
//! use ltvcatalog::{Category, Channel, Playlist};
//!
//! let mut catalog = Playlist::default();
//! let mut news = Category::new("News");
//! news.channels.push(Channel::new("Channel A", "http://example.org/a.m3u8"));
//! catalog.categories.push(news);
//!
//! let mut other = Playlist::default();
//! let mut news2 = Category::new("News");
//! news2.channels.push(Channel::new("Channel B", "http://example.org/b.m3u8"));
//! other.categories.push(news2);
//!
//! catalog.merge_with(other);
//! assert_eq!(catalog.categories.len(), 1);
//! assert_eq!(catalog.categories[0].channels.len(), 2);
//! ```

mod category;
mod channel;
mod playlist;

pub use category::{Category, FAVORITES_CATEGORY};
pub use channel::{Channel, ChannelIdentity};
pub use playlist::Playlist;
