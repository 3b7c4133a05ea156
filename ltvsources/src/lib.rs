//! # ltvsources - Concurrent playlist acquisition for LoungeTV
//!
//! This crate fetches and parses every configured playlist source
//! concurrently and streams the per-source outcomes to a single
//! consumer:
//!
//! - **SourceDescriptor**: a remote URL or local path plus its expected
//!   format
//! - **PlaylistParser**: the parsing seam, with M3U and JSON
//!   implementations and format auto-detection
//! - **SourcesReader**: spawns one fetch+parse task per source and
//!   delivers [`SourceEvent`]s over a bounded channel, closing the cycle
//!   with exactly one `Finished`
//!
//! Transport failures and unparseable payloads are reported separately:
//! an unreachable source yields [`SourceEvent::Error`], a reachable but
//! malformed one yields [`SourceEvent::Response`] with no playlist.
//!
//! # Example
//!
//! ```no_run
//! use ltvsources::{SourceDescriptor, SourceEvent, SourcesReader};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = SourcesReader::new()?;
//! let mut handle = reader.spawn(vec![
//!     SourceDescriptor::remote("https://example.org/channels.m3u"),
//!     SourceDescriptor::local("/etc/loungetv/extra.json"),
//! ]);
//!
//! while let Some(event) = handle.recv().await {
//!     match event {
//!         SourceEvent::Response { source, playlist } => {
//!             println!("{source}: {}", playlist.is_some());
//!         }
//!         SourceEvent::Error { source, kind, .. } => eprintln!("[{kind}] {source}"),
//!         SourceEvent::Finished => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod error;
pub mod parse;
mod reader;

#[cfg(feature = "ltvconfig")]
mod config_ext;

pub use descriptor::{SourceDescriptor, SourceFormat, SourceOrigin};
pub use error::{Result, SourceError, SourceErrorKind};
pub use parse::{JsonParser, M3uParser, PlaylistParser};
pub use reader::{ReaderAborter, ReaderHandle, SourceEvent, SourcesReader, SourcesReaderBuilder};

#[cfg(feature = "ltvconfig")]
pub use config_ext::SourcesConfigExt;
