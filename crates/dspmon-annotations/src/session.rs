use dspmon_core::Status;

use crate::store::AnnotationMap;

/// In-memory annotation state for one operator session.
///
/// Lifecycle: initialised from the persisted document at session start,
/// mutated as the operator edits dropdowns, flushed back on explicit save.
/// Feed refreshes only ever add default entries — they never remove keys
/// or reset edits, so unsaved changes survive both the timer and manual
/// refresh, and annotations for stores that left the feed are retained.
#[derive(Debug, Default)]
pub struct AnnotationSession {
    map: AnnotationMap,
    dirty: bool,
}

impl AnnotationSession {
    #[must_use]
    pub fn new(map: AnnotationMap) -> Self {
        Self { map, dirty: false }
    }

    #[must_use]
    pub fn map(&self) -> &AnnotationMap {
        &self.map
    }

    #[must_use]
    pub fn contains(&self, store_id: &str) -> bool {
        self.map.contains_key(store_id)
    }

    /// Current status for a store; unknown identifiers read as unset.
    #[must_use]
    pub fn status_of(&self, store_id: &str) -> Status {
        self.map.get(store_id).copied().unwrap_or_default()
    }

    /// Ensure every given identifier has an entry, defaulting to unset.
    ///
    /// Seeding is not an edit: it never sets the dirty flag. Returns the
    /// number of entries inserted.
    pub fn seed_defaults<'a>(&mut self, store_ids: impl IntoIterator<Item = &'a str>) -> usize {
        let mut inserted = 0;
        for id in store_ids {
            if !self.map.contains_key(id) {
                self.map.insert(id.to_string(), Status::Unset);
                inserted += 1;
            }
        }
        inserted
    }

    /// Record an operator edit. Returns `false` (and changes nothing) for
    /// an identifier the session has never seen.
    pub fn set_status(&mut self, store_id: &str, status: Status) -> bool {
        let Some(entry) = self.map.get_mut(store_id) else {
            return false;
        };
        if *entry != status {
            *entry = status;
            self.dirty = true;
        }
        true
    }

    /// Whether in-memory edits have not yet been flushed to storage.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
