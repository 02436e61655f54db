use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dspmon_core::Status;

use crate::error::AnnotationError;

/// Store identifier → operator status. Keyed by identifier, never by row
/// position, so annotations stay attached across feed refreshes.
pub type AnnotationMap = BTreeMap<String, Status>;

/// Durable backing for the annotation map: one JSON object at a fixed
/// path, read at session start and fully rewritten on save.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    path: PathBuf,
}

impl AnnotationStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted annotation map.
    ///
    /// A missing document is not an error — a fresh session simply starts
    /// with an empty map.
    ///
    /// # Errors
    ///
    /// - [`AnnotationError::Read`] — the document exists but cannot be read.
    /// - [`AnnotationError::Parse`] — the document is not a valid JSON
    ///   object of status labels.
    pub fn load(&self) -> Result<AnnotationMap, AnnotationError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no annotation document; starting empty");
                return Ok(AnnotationMap::new());
            }
            Err(e) => {
                return Err(AnnotationError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| AnnotationError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Atomically replaces the annotation document with `map`.
    ///
    /// Writes the full JSON object to a sibling temp file and renames it
    /// over the target, so a crash mid-save never leaves a half-written
    /// document behind.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::Write`] if the temp file cannot be
    /// written or the rename fails.
    pub fn save(&self, map: &AnnotationMap) -> Result<(), AnnotationError> {
        let write_err = |e: std::io::Error| AnnotationError::Write {
            path: self.path.clone(),
            source: e,
        };

        let body = serde_json::to_string_pretty(map).map_err(|e| AnnotationError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, body).map_err(write_err)?;
        std::fs::rename(&tmp_path, &self.path).map_err(write_err)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = map.len(),
            "annotation document saved"
        );
        Ok(())
    }
}
