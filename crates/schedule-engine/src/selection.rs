//! Persisted set of selected screening ids.
//!
//! The validator never touches the selection; callers read a snapshot,
//! resolve it against the catalog and pass the screenings in.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Ordered, duplicate-free set of screening ids.
pub trait SelectionStore {
    /// Ids in the order they were added.
    fn selected_ids(&self) -> Result<Vec<String>>;

    /// Add `id` unless it is already selected.
    fn add(&mut self, id: &str) -> Result<()>;

    /// Remove `id` if present.
    fn remove(&mut self, id: &str) -> Result<()>;

    /// Forget the whole selection.
    fn clear(&mut self) -> Result<()>;

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.selected_ids()?.iter().any(|s| s == id))
    }
}

// ── In-memory ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySelection {
    ids: Vec<String>,
}

impl MemorySelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelection {
    fn selected_ids(&self) -> Result<Vec<String>> {
        Ok(self.ids.clone())
    }

    fn add(&mut self, id: &str) -> Result<()> {
        if !self.ids.iter().any(|s| s == id) {
            self.ids.push(id.to_string());
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        self.ids.retain(|s| s != id);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.ids.clear();
        Ok(())
    }
}

// ── JSON file ───────────────────────────────────────────────────────────────

/// A selection stored as a JSON array of ids.
///
/// A missing file reads as an empty selection; `clear` deletes the file.
#[derive(Debug, Clone)]
pub struct JsonFileSelection {
    path: PathBuf,
}

impl JsonFileSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, ids: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(ids)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), count = ids.len(), "selection saved");
        Ok(())
    }
}

impl SelectionStore for JsonFileSelection {
    fn selected_ids(&self) -> Result<Vec<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn add(&mut self, id: &str) -> Result<()> {
        let mut ids = self.selected_ids()?;
        if ids.iter().any(|s| s == id) {
            return Ok(());
        }
        ids.push(id.to_string());
        self.save(&ids)
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let mut ids = self.selected_ids()?;
        ids.retain(|s| s != id);
        self.save(&ids)
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
