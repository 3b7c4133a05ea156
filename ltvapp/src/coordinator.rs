//! Coordinator: drives fetch cycles and owns the working catalog

use crate::{Error, Preferences, Result};
use ltvcache::CacheStore;
use ltvcatalog::{Channel, Playlist};
use ltvsources::{
    ReaderAborter, SourceDescriptor, SourceErrorKind, SourceEvent, SourcesReader,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Capacity of the outbound event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Lifecycle of the most recent fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    Loading,
    /// Cycle finished with a usable catalog and no source failures.
    Loaded,
    /// Cycle finished with a usable catalog, but some sources failed.
    PartialWithErrors,
    /// Cycle finished with nothing to show; the cache was not touched.
    TotalFailure,
}

/// One failed source of a cycle, as reported to the caller.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub source: String,
    pub kind: SourceErrorKind,
}

/// Terminal outcome of [`Coordinator::request_update`].
#[derive(Debug)]
pub enum CycleOutcome {
    /// A catalog was produced; `errors` lists the sources that failed.
    Loaded { errors: Vec<SourceFailure> },
    /// Every source failed or parsed empty. The previous snapshot, if
    /// any, is still intact; the caller decides between retry, cache
    /// fallback and reconfiguration.
    TotalFailure { cache_available: bool },
    /// A newer cycle started before this one finished; its results were
    /// discarded.
    Superseded,
}

/// Event stream consumed by the presentation layer.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// One source failed; non-blocking, the cycle continues.
    SourceErrored {
        source: String,
        kind: SourceErrorKind,
    },
    /// The merged, finalized catalog of a finished cycle.
    CatalogReady(Playlist),
    /// The cycle produced nothing; a blocking choice is required.
    TotalFailure { cache_available: bool },
}

/// Aggregation coordinator.
///
/// Owns the working catalog of the current fetch cycle exclusively: all
/// reader events are drained on the task that called `request_update`,
/// so merges never interleave. A generation counter tags every cycle;
/// starting a new one aborts the previous reader and anything the old
/// cycle still delivers is discarded.
pub struct Coordinator {
    reader: SourcesReader,
    cache: CacheStore,
    sources: Vec<SourceDescriptor>,
    preferences: Preferences,
    generation: AtomicU64,
    current_cycle: Mutex<Option<(u64, ReaderAborter)>>,
    state: Mutex<UpdateState>,
    event_tx: broadcast::Sender<CatalogEvent>,
}

impl Coordinator {
    pub fn new(
        reader: SourcesReader,
        cache: CacheStore,
        sources: Vec<SourceDescriptor>,
        preferences: Preferences,
    ) -> Self {
        Self {
            reader,
            cache,
            sources,
            preferences,
            generation: AtomicU64::new(0),
            current_cycle: Mutex::new(None),
            state: Mutex::new(UpdateState::Idle),
            event_tx: broadcast::channel(EVENT_CHANNEL_CAPACITY).0,
        }
    }

    /// Builds a coordinator from the global configuration: configured
    /// sources, configured cache directory, configured preferences.
    pub fn from_config(config: &ltvconfig::Config) -> anyhow::Result<Self> {
        use crate::PreferencesConfigExt;
        use ltvcache::CacheConfigExt;
        use ltvsources::SourcesConfigExt;

        Ok(Self::new(
            SourcesReader::new()?,
            config.catalog_cache_store()?,
            config.get_playlist_sources()?,
            config.get_preferences()?,
        ))
    }

    /// Subscribes to the coordinator's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.event_tx.subscribe()
    }

    pub fn state(&self) -> UpdateState {
        *self.state.lock().unwrap()
    }

    /// Runs one full fetch cycle.
    ///
    /// With `use_cache` set and a snapshot available, the network is
    /// short-circuited and the snapshot becomes the working catalog; a
    /// cache-miss degrades to a normal fetch instead of failing.
    pub async fn request_update(&self, use_cache: bool) -> CycleOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_previous_cycle();
        self.set_state(UpdateState::Loading);

        if use_cache {
            if let Some(snapshot) = self.cache.read_catalog() {
                info!("Serving catalog from cache snapshot");
                return self.complete(generation, snapshot, Vec::new());
            }
            debug!("Cache requested but empty, falling back to fetch");
        }

        let mut handle = self.reader.spawn(self.sources.clone());
        {
            let mut current = self.current_cycle.lock().unwrap();
            *current = Some((generation, handle.aborter()));
        }

        let mut working = Playlist::default();
        let mut failures = Vec::new();
        let mut finished = false;

        while let Some(event) = handle.recv().await {
            if !self.is_current(generation) {
                break;
            }
            match event {
                SourceEvent::Response {
                    source,
                    playlist: Some(playlist),
                } => {
                    debug!(source = %source, categories = playlist.categories.len(),
                           "Merging source response");
                    working.merge_with(playlist);
                }
                SourceEvent::Response {
                    source,
                    playlist: None,
                } => {
                    warn!(source = %source, "Source payload could not be parsed");
                    failures.push(self.report_failure(source.to_string(), SourceErrorKind::Parse));
                }
                SourceEvent::Error { source, kind, error } => {
                    warn!(source = %source, error = %error, "Source fetch failed");
                    failures.push(self.report_failure(source.to_string(), kind));
                }
                SourceEvent::Finished => {
                    finished = true;
                    break;
                }
            }
        }

        if !finished || !self.is_current(generation) {
            debug!(generation, "Fetch cycle superseded, discarding results");
            return CycleOutcome::Superseded;
        }
        self.clear_cycle(generation);

        if working.is_categories_empty() {
            let cache_available = self.cache.has_catalog();
            self.set_state(UpdateState::TotalFailure);
            let _ = self
                .event_tx
                .send(CatalogEvent::TotalFailure { cache_available });
            warn!(cache_available, "Every source failed, catalog unavailable");
            return CycleOutcome::TotalFailure { cache_available };
        }

        self.complete(generation, working, failures)
    }

    /// Returns the finalized cache snapshot without running a cycle and
    /// without overwriting the cache. This is the total-failure fallback.
    pub fn load_cached_catalog(&self) -> Option<Playlist> {
        let snapshot = self.cache.read_catalog()?;
        Some(self.finalize(snapshot, false))
    }

    /// Flips a channel's favorite status, persisting immediately.
    ///
    /// Returns whether the channel is a favorite afterwards.
    pub fn toggle_favorite(&self, channel: &Channel) -> Result<bool> {
        if !channel.can_favorite {
            return Err(Error::NotFavoritable(channel.name.clone()));
        }

        let identity = channel.identity();
        if self.cache.is_favorite(&identity) {
            self.cache.remove_favorite(&identity)?;
            Ok(false)
        } else {
            self.cache.insert_or_update_favorite(channel)?;
            Ok(true)
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    fn complete(
        &self,
        generation: u64,
        working: Playlist,
        failures: Vec<SourceFailure>,
    ) -> CycleOutcome {
        if !self.is_current(generation) {
            return CycleOutcome::Superseded;
        }
        let catalog = self.finalize(working, true);
        self.set_state(if failures.is_empty() {
            UpdateState::Loaded
        } else {
            UpdateState::PartialWithErrors
        });

        info!(
            categories = catalog.categories.len(),
            source_errors = failures.len(),
            "Catalog ready"
        );
        let _ = self.event_tx.send(CatalogEvent::CatalogReady(catalog));
        CycleOutcome::Loaded { errors: failures }
    }

    /// Applies preferences, trims unplayable channels, reconciles the
    /// persisted favorites and optionally writes the snapshot back.
    fn finalize(&self, mut catalog: Playlist, write_cache: bool) -> Playlist {
        if self.preferences.sort_category {
            catalog.sort_categories();
        }
        if self.preferences.sort_channel {
            catalog.sort_channels();
        }
        catalog.trim_empty_stream_urls();

        match self.cache.trim_not_exist_from(&catalog) {
            Some(mut favorites) => {
                if self.preferences.sort_favorite {
                    favorites.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                }
                catalog.insert_favorites(favorites);
            }
            None => catalog.remove_favorites(),
        }

        if write_cache {
            // non-fatal: the in-memory catalog is still delivered
            if let Err(err) = self.cache.write_catalog(&catalog) {
                warn!(error = %err, "Failed to write catalog snapshot");
            }
        }

        catalog
    }

    fn report_failure(&self, source: String, kind: SourceErrorKind) -> SourceFailure {
        let _ = self.event_tx.send(CatalogEvent::SourceErrored {
            source: source.clone(),
            kind,
        });
        SourceFailure { source, kind }
    }

    fn cancel_previous_cycle(&self) {
        let previous = self.current_cycle.lock().unwrap().take();
        if let Some((generation, aborter)) = previous {
            debug!(generation, "Cancelling in-flight fetch cycle");
            aborter.abort();
        }
    }

    fn clear_cycle(&self, generation: u64) {
        let mut current = self.current_cycle.lock().unwrap();
        if current.as_ref().is_some_and(|(tag, _)| *tag == generation) {
            *current = None;
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_state(&self, state: UpdateState) {
        *self.state.lock().unwrap() = state;
    }
}
