// Cache-and-refresh protocol shared by the network-backed widgets.
// A refresh renders a cached entry when it is fresh, otherwise runs the
// widget's lookup chain and caches the result; failures surface as an error
// panel with manual retry.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::Store;

/// How long a cached rendering stays valid for both weather and news.
pub const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// A cached rendering with its write timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The rendered widget output.
    pub rendered: String,
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(rendered: String) -> Self {
        Self {
            rendered,
            cached_at: Utc::now(),
        }
    }

    /// Whether the entry is still within `ttl` of its write time.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed < ttl
    }
}

/// Read the entry under `cache_key` if present and fresh.
pub fn read_fresh(store: &Store, cache_key: &str) -> Option<String> {
    let entry: Option<CacheEntry> = store.get(cache_key, None);
    entry
        .filter(|entry| entry.is_fresh(CACHE_TTL))
        .map(|entry| entry.rendered)
}

/// Result of one run of the refresh protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Rendered from a fresh cache entry; the lookup was not invoked.
    Cached(String),
    /// Rendered from the lookup; a cache entry was written.
    Fetched(String),
    /// The lookup failed; nothing was written.
    Failed(String),
}

/// Run the refresh protocol for one widget.
///
/// The lookup is only invoked on a cache miss, and partial progress inside a
/// failed lookup is discarded wholesale. Retry is re-running this function.
pub async fn run_refresh<F, Fut>(store: &Store, cache_key: &str, lookup: F) -> RefreshOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    if let Some(rendered) = read_fresh(store, cache_key) {
        return RefreshOutcome::Cached(rendered);
    }
    match lookup().await {
        Ok(rendered) => {
            store.set(cache_key, &CacheEntry::new(rendered.clone()));
            RefreshOutcome::Fetched(rendered)
        }
        Err(err) => RefreshOutcome::Failed(err.to_string()),
    }
}

/// Render state of a refreshable panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WidgetView {
    #[default]
    Idle,
    Loading,
    Ready(String),
    Error(String),
}

impl WidgetView {
    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetView::Loading)
    }
}

/// Per-widget refresh state with a generation counter.
///
/// Overlapping refreshes (rapid retries, parameter changes mid-flight) each
/// get a new generation; a completion carrying a stale generation is
/// discarded rather than rendered.
#[derive(Debug, Default)]
pub struct RefreshSlot {
    pub view: WidgetView,
    generation: u64,
}

impl RefreshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new refresh: bump the generation and show the loading
    /// placeholder. Returns the generation to tag the in-flight lookup with.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.view = WidgetView::Loading;
        self.generation
    }

    /// Render a result without a fetch (warm cache path). Bumps the
    /// generation so any still-running refresh for earlier parameters is
    /// discarded when it completes.
    pub fn show(&mut self, rendered: String) {
        self.generation += 1;
        self.view = WidgetView::Ready(rendered);
    }

    /// Apply a completed lookup. Returns false when the result belonged to a
    /// superseded generation and was dropped.
    pub fn complete(&mut self, generation: u64, outcome: RefreshOutcome) -> bool {
        if generation != self.generation {
            return false;
        }
        self.view = match outcome {
            RefreshOutcome::Cached(rendered) | RefreshOutcome::Fetched(rendered) => {
                WidgetView::Ready(rendered)
            }
            RefreshOutcome::Failed(message) => WidgetView::Error(message),
        };
        true
    }
}
