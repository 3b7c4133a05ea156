//! SourcesReader: concurrent fetch+parse over all configured sources

use crate::parse::parse_playlist;
use crate::{Result, SourceDescriptor, SourceError, SourceErrorKind, SourceOrigin};
use ltvcatalog::Playlist;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Default timeout for one source fetch (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "LoungeTV/0.1 (ltvsources)";

/// Bounded capacity of the per-cycle event channel. One consumer drains
/// it; slow consumption backpressures the fetch tasks instead of
/// buffering whole playlists without limit.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Per-source outcome delivered to the cycle's consumer.
#[derive(Debug)]
pub enum SourceEvent {
    /// The source was reachable. `playlist` is `None` when the payload
    /// could not be parsed, which is distinct from a transport failure.
    Response {
        source: SourceDescriptor,
        playlist: Option<Playlist>,
    },
    /// The source was unreachable.
    Error {
        source: SourceDescriptor,
        kind: SourceErrorKind,
        error: SourceError,
    },
    /// Every source has completed. Sent exactly once, after all
    /// `Response`/`Error` events of the cycle.
    Finished,
}

/// Fetches and parses every source of a cycle concurrently.
///
/// The reader is cheap to clone (it shares one HTTP connection pool) and
/// stateless across cycles; each [`SourcesReader::spawn`] call starts an
/// independent cycle with its own event channel.
#[derive(Debug, Clone)]
pub struct SourcesReader {
    client: Client,
    timeout: Duration,
}

impl SourcesReader {
    /// Creates a reader with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a builder for configuring the reader.
    pub fn builder() -> SourcesReaderBuilder {
        SourcesReaderBuilder::default()
    }

    /// Creates a reader over a custom `reqwest::Client`.
    ///
    /// Useful for sharing HTTP connection pools or proxy settings.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Starts one fetch cycle: one task per source, no mutual ordering.
    ///
    /// Each source produces exactly one `Response` or `Error` event;
    /// once every task has completed a supervisor sends exactly one
    /// `Finished`, however many sources failed. Total failure is the
    /// consumer's call: no reader-side event distinguishes it.
    pub fn spawn(&self, sources: Vec<SourceDescriptor>) -> ReaderHandle {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let mut tasks = Vec::with_capacity(sources.len());
        for source in sources {
            let reader = self.clone();
            let tx = tx.clone();
            tasks.push(tokio::spawn(async move {
                debug!(source = %source, "Fetching playlist source");
                let event = match reader.fetch(&source).await {
                    Ok(text) => SourceEvent::Response {
                        playlist: parse_playlist(&text, source.format),
                        source,
                    },
                    Err(error) => SourceEvent::Error {
                        kind: error.kind(),
                        error,
                        source,
                    },
                };
                // receiver gone means the cycle was abandoned
                let _ = tx.send(event).await;
            }));
        }

        let fetch_tasks: Vec<AbortHandle> = tasks.iter().map(|t| t.abort_handle()).collect();
        let supervisor = tokio::spawn(async move {
            for task in tasks {
                let _ = task.await;
            }
            let _ = tx.send(SourceEvent::Finished).await;
        });

        ReaderHandle {
            events: rx,
            fetch_tasks,
            supervisor: supervisor.abort_handle(),
        }
    }

    async fn fetch(&self, source: &SourceDescriptor) -> Result<String> {
        match &source.origin {
            SourceOrigin::Remote(url) => {
                let response = self
                    .client
                    .get(url)
                    .timeout(self.timeout)
                    .send()
                    .await?;
                if !response.status().is_success() {
                    return Err(SourceError::Status(response.status()));
                }
                Ok(response.text().await?)
            }
            SourceOrigin::Local(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

/// One in-flight fetch cycle.
///
/// Dropping the handle aborts every outstanding task, so a superseded
/// cycle can never deliver late events into a newer one.
pub struct ReaderHandle {
    events: mpsc::Receiver<SourceEvent>,
    fetch_tasks: Vec<AbortHandle>,
    supervisor: AbortHandle,
}

impl ReaderHandle {
    /// Receives the next event; `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<SourceEvent> {
        self.events.recv().await
    }

    /// Cancels all outstanding fetch tasks and the completion signal.
    pub fn abort(&self) {
        for task in &self.fetch_tasks {
            task.abort();
        }
        self.supervisor.abort();
    }

    /// Detached cancellation handle for this cycle, usable while the
    /// consumer owns the handle itself.
    pub fn aborter(&self) -> ReaderAborter {
        ReaderAborter {
            fetch_tasks: self.fetch_tasks.clone(),
            supervisor: self.supervisor.clone(),
        }
    }
}

/// Cancels a cycle from outside its consumer task.
#[derive(Debug, Clone)]
pub struct ReaderAborter {
    fetch_tasks: Vec<AbortHandle>,
    supervisor: AbortHandle,
}

impl ReaderAborter {
    pub fn abort(&self) {
        for task in &self.fetch_tasks {
            task.abort();
        }
        self.supervisor.abort();
    }
}

impl Drop for ReaderHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Builder for [`SourcesReader`]
#[derive(Debug, Default)]
pub struct SourcesReaderBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    client: Option<Client>,
}

impl SourcesReaderBuilder {
    /// Per-source fetch timeout (default 30 seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Pre-built HTTP client; overrides `user_agent`
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<SourcesReader> {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(
                    self.user_agent
                        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                )
                .build()?,
        };

        Ok(SourcesReader { client, timeout })
    }
}
