//! Per-session source file tracking.

use std::path::{Path, PathBuf};

/// Single-slot record of the file the current edits belong to.
///
/// Every load rewrites the slot: the new path on success, empty on
/// failure. No history is kept, so a save always targets the most
/// recently loaded file or fails for lack of one.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    source: Option<PathBuf>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `path` as the current source file, replacing any previous one.
    pub fn set(&mut self, path: impl Into<PathBuf>) {
        self.source = Some(path.into());
    }

    /// Forget the current source file.
    pub fn clear(&mut self) {
        self.source = None;
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
