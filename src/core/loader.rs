//! Snapshot loading with a populate-once cache
//!
//! Every failure (missing file, network error, bad status, malformed body)
//! collapses into the built-in document. The result, live or default, stays
//! cached until `SnapshotCache::invalidate`.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::types::{LoadReason, Snapshot};

/// Where the snapshot document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    File(PathBuf),
    Http(String),
}

impl SnapshotSource {
    /// `http://` / `https://` → HTTP, anything else is a file path
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            SnapshotSource::Http(s.to_string())
        } else {
            SnapshotSource::File(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotSource::File(path) => write!(f, "{}", path.display()),
            SnapshotSource::Http(url) => write!(f, "{}", url),
        }
    }
}

/// Why a fetch failed. Only surfaced by `fetch_strict`; `load` logs and falls back.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Fallback reason code for logging
    pub fn reason(&self) -> LoadReason {
        match self {
            FetchError::Io(_) => LoadReason::R110_FALLBACK_IO,
            FetchError::Http(_) => LoadReason::R111_FALLBACK_NETWORK,
            FetchError::Status(_) => LoadReason::R112_FALLBACK_STATUS,
            FetchError::Parse(_) => LoadReason::R113_FALLBACK_PARSE,
        }
    }
}

/// Process-lifetime snapshot slot, owned by the composition root.
///
/// Readers share the fast path; the first miss takes `populate` and re-checks,
/// so concurrent first callers trigger a single fetch.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<Arc<Snapshot>>>,
    populate: Mutex<()>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached document, if any
    pub async fn get(&self) -> Option<Arc<Snapshot>> {
        self.slot.read().await.clone()
    }

    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Return the cached document or run `init` exactly once to produce it
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Arc<Snapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Snapshot>,
    {
        if let Some(snapshot) = self.get().await {
            debug!(reason = LoadReason::R102_CACHE_HIT.code(), "snapshot cache hit");
            return snapshot;
        }

        let _guard = self.populate.lock().await;
        if let Some(snapshot) = self.get().await {
            debug!(reason = LoadReason::R102_CACHE_HIT.code(), "snapshot populated while waiting");
            return snapshot;
        }

        let snapshot = Arc::new(init().await);
        *self.slot.write().await = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the cached document; the next load fetches again
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
        info!("snapshot cache invalidated");
    }
}

/// Fetches the snapshot document from its source
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    source: SnapshotSource,
    client: reqwest::Client,
}

impl SnapshotLoader {
    pub fn new(source: SnapshotSource, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { source, client }
    }

    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    /// Cached snapshot, fetching on first use. Never fails.
    pub async fn load(&self, cache: &SnapshotCache) -> Arc<Snapshot> {
        cache.get_or_init(|| self.fetch_or_default()).await
    }

    /// One fetch attempt; on failure the built-in document
    pub async fn fetch_or_default(&self) -> Snapshot {
        match self.fetch_strict().await {
            Ok(snapshot) => {
                info!(
                    reason = LoadReason::R101_LOADED.code(),
                    source = %self.source,
                    last_updated = %snapshot.last_updated,
                    "snapshot loaded"
                );
                snapshot
            }
            Err(e) => {
                warn!(
                    reason = e.reason().code(),
                    source = %self.source,
                    error = %e,
                    "snapshot unavailable, using built-in defaults"
                );
                Snapshot::builtin()
            }
        }
    }

    /// One fetch attempt with the failure surfaced
    pub async fn fetch_strict(&self) -> Result<Snapshot, FetchError> {
        let body = match &self.source {
            SnapshotSource::File(path) => tokio::fs::read_to_string(path).await?,
            SnapshotSource::Http(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }
                response.text().await?
            }
        };
        Ok(serde_json::from_str(&body)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
