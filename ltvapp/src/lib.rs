//! # ltvapp - Catalog aggregation coordinator for LoungeTV
//!
//! The [`Coordinator`] drives one fetch cycle end to end:
//!
//! 1. spawns the concurrent source reader over the configured sources
//! 2. merges every successful partial result into a working catalog,
//!    draining reader events on a single task
//! 3. applies the viewing preferences (sorting, trimming) and reconciles
//!    the persisted favorites against the fresh catalog
//! 4. persists the result through the cache store
//! 5. publishes [`CatalogEvent`]s for the presentation layer and decides
//!    between loaded, partial and total-failure outcomes
//!
//! Total failure never touches the previous snapshot: the caller picks
//! between retrying, falling back to the cache and reconfiguring.
//!
//! # Example
//!
//! ```no_run
//! use ltvapp::{Coordinator, CycleOutcome};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ltvconfig::get_config();
//! let coordinator = Coordinator::from_config(&config)?;
//!
//! match coordinator.request_update(false).await {
//!     CycleOutcome::Loaded { errors } => println!("loaded, {} source errors", errors.len()),
//!     CycleOutcome::TotalFailure { cache_available } => {
//!         if cache_available {
//!             let fallback = coordinator.load_cached_catalog();
//!             println!("serving cache: {}", fallback.is_some());
//!         }
//!     }
//!     CycleOutcome::Superseded => {}
//! }
//! # Ok(())
//! # }
//! ```

mod config_ext;
mod coordinator;
mod error;
mod preferences;

pub use config_ext::PreferencesConfigExt;
pub use coordinator::{
    CatalogEvent, Coordinator, CycleOutcome, SourceFailure, UpdateState,
};
pub use error::{Error, Result};
pub use preferences::Preferences;
