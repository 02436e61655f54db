use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::resolve::{ColumnMapping, ResolutionAdvisory};
use crate::table::FeedTable;

/// One successful feed load plus the schema resolution that went with it.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub table: FeedTable,
    pub mapping: ColumnMapping,
    pub advisories: Vec<ResolutionAdvisory>,
    /// Wall-clock load time, shown to the operator as "last refreshed".
    pub fetched_at: DateTime<Utc>,
}

impl FeedSnapshot {
    /// Store identifier for a data row: the identity cell, falling back
    /// to the row position when the table resolved no identity column.
    #[must_use]
    pub fn store_id(&self, row: usize) -> String {
        self.mapping
            .identity
            .and_then(|column| self.table.cell(row, column))
            .map_or_else(|| row.to_string(), ToOwned::to_owned)
    }

    /// Identifiers for every data row, in row order.
    #[must_use]
    pub fn store_ids(&self) -> Vec<String> {
        (0..self.table.len()).map(|row| self.store_id(row)).collect()
    }
}

/// TTL cache for the last successful feed load.
///
/// Only successful loads are stored; a failed fetch leaves the previous
/// entry (or emptiness) untouched so the next call retries. Manual
/// refresh goes through [`FeedCache::invalidate`].
#[derive(Debug)]
pub struct FeedCache {
    ttl: Duration,
    entry: Option<(FeedSnapshot, Instant)>,
}

impl FeedCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached snapshot if one exists and is still fresh.
    #[must_use]
    pub fn get(&self, now: Instant) -> Option<&FeedSnapshot> {
        match &self.entry {
            Some((snapshot, _)) if !self.is_stale(now) => Some(snapshot),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_stale(&self, now: Instant) -> bool {
        match &self.entry {
            Some((_, stored_at)) => now.duration_since(*stored_at) >= self.ttl,
            None => true,
        }
    }

    pub fn store(&mut self, snapshot: FeedSnapshot, now: Instant) {
        self.entry = Some((snapshot, now));
    }

    /// Drops the cached entry so the next load refetches immediately.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Wall-clock time of the last successful load, surviving staleness
    /// (the operator still sees when data was last refreshed while a
    /// reload is pending).
    #[must_use]
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|(s, _)| s.fetched_at)
    }
}
