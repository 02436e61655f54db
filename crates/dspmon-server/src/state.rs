use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use dspmon_annotations::{AnnotationSession, AnnotationStore};
use dspmon_core::AppConfig;
use dspmon_feed::{resolve_columns, FeedCache, FeedClient, FeedSnapshot};

/// Shared handles for request handlers and the background refresh job.
///
/// The feed cache and the annotation session are the two mutable pieces;
/// each sits behind its own mutex so a slow feed fetch never blocks an
/// annotation edit.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub feed: Arc<FeedClient>,
    pub cache: Arc<Mutex<FeedCache>>,
    pub session: Arc<Mutex<AnnotationSession>>,
    pub store: Arc<AnnotationStore>,
    /// Set when the annotation document existed but could not be loaded
    /// at startup; surfaced on the dashboard so the degradation to an
    /// empty annotation set is visible rather than silent.
    pub annotation_load_error: Option<Arc<str>>,
}

/// Result of one load attempt: a snapshot when data is available, plus an
/// operator-facing message when the fetch failed.
#[derive(Debug)]
pub struct FeedOutcome {
    pub snapshot: Option<FeedSnapshot>,
    pub error: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        feed: FeedClient,
        store: AnnotationStore,
        session: AnnotationSession,
        annotation_load_error: Option<String>,
    ) -> Self {
        let cache = FeedCache::new(Duration::from_secs(config.feed_ttl_secs));
        Self {
            config: Arc::new(config),
            feed: Arc::new(feed),
            cache: Arc::new(Mutex::new(cache)),
            session: Arc::new(Mutex::new(session)),
            store: Arc::new(store),
            annotation_load_error: annotation_load_error.map(Into::into),
        }
    }

    /// Returns the current feed snapshot, fetching when the cache is
    /// empty or stale.
    ///
    /// A successful load seeds a default (unset) annotation entry for
    /// every store identifier the session has not seen, so each rendered
    /// row always has an annotation to bind to. A failed fetch is not
    /// cached: the caller gets no snapshot plus an error message, and the
    /// next call retries.
    pub async fn load_feed(&self) -> FeedOutcome {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        if let Some(snapshot) = cache.get(now) {
            return FeedOutcome {
                snapshot: Some(snapshot.clone()),
                error: None,
            };
        }

        match self.feed.fetch().await {
            Ok(table) => {
                let (mapping, advisories) = resolve_columns(table.headers());
                let snapshot = FeedSnapshot {
                    table,
                    mapping,
                    advisories,
                    fetched_at: chrono::Utc::now(),
                };
                cache.store(snapshot.clone(), now);
                drop(cache);

                self.seed_session(&snapshot).await;
                FeedOutcome {
                    snapshot: Some(snapshot),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(url = %self.feed.feed_url(), error = %e, "feed load failed");
                FeedOutcome {
                    snapshot: None,
                    error: Some(format!("error loading data: {e}")),
                }
            }
        }
    }

    /// Drops the cached feed so the next load refetches immediately.
    /// Never touches the annotation session, so unsaved edits survive.
    pub async fn invalidate_feed(&self) {
        self.cache.lock().await.invalidate();
    }

    async fn seed_session(&self, snapshot: &FeedSnapshot) {
        let ids = snapshot.store_ids();
        let mut session = self.session.lock().await;
        let inserted = session.seed_defaults(ids.iter().map(String::as_str));
        if inserted > 0 {
            tracing::info!(inserted, "seeded default annotations for new stores");
        }
    }
}
