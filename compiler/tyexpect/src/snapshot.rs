//! Type snapshots.
//!
//! A snapshot is a type text stored outside the source under
//! `(file name, snapshot name)`. `$ExpectTypeSnapshot` compares against it,
//! and a mismatch produces a [`SnapshotUpdate`] that rewrites it.
//!
//! Updating is two-phase. [`SnapshotUpdate::edit`] is the in-source part of
//! the fix and is always empty, since snapshots never live in the source.
//! [`SnapshotUpdate::apply`] performs the store write, at most once per update.

use rustc_hash::FxHashMap;
use tyexpect_diagnostic::TextEdit;

/// Failure to persist a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The store refused the write.
    #[error("cannot write snapshot `{name}` for `{file_name}`: {reason}")]
    Rejected {
        file_name: String,
        name: String,
        reason: String,
    },

    /// A file-backed store failed.
    #[error("snapshot store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent snapshot storage, owned by the host.
pub trait SnapshotStore {
    /// The stored text, or `None` when no snapshot was recorded.
    fn read(&self, file_name: &str, name: &str) -> Option<String>;

    /// Record `text`, replacing any previous snapshot.
    fn write(&mut self, file_name: &str, name: &str, text: &str) -> Result<(), SnapshotError>;
}

/// Snapshot store held in memory, grouped by file.
#[derive(Clone, Debug, Default)]
pub struct InMemorySnapshotStore {
    files: FxHashMap<String, FxHashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        InMemorySnapshotStore::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.files.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(FxHashMap::is_empty)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self, file_name: &str, name: &str) -> Option<String> {
        self.files.get(file_name)?.get(name).cloned()
    }

    fn write(&mut self, file_name: &str, name: &str, text: &str) -> Result<(), SnapshotError> {
        self.files
            .entry(file_name.to_string())
            .or_default()
            .insert(name.to_string(), text.to_string());
        Ok(())
    }
}

/// Pending rewrite of one snapshot.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SnapshotUpdate {
    file_name: String,
    name: String,
    text: String,
    applied: bool,
}

impl SnapshotUpdate {
    pub fn new(file_name: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        SnapshotUpdate {
            file_name: file_name.into(),
            name: name.into(),
            text: text.into(),
            applied: false,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Snapshot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text that will be stored.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The in-source edit: empty, at the start of the file. Pure.
    pub fn edit(&self) -> TextEdit {
        TextEdit::insert(0, String::new())
    }

    /// Has [`SnapshotUpdate::apply`] written the snapshot?
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Write the snapshot. Returns `Ok(false)` without touching the store
    /// when this update was already applied. A failed write leaves the update
    /// pending.
    pub fn apply(&mut self, store: &mut dyn SnapshotStore) -> Result<bool, SnapshotError> {
        if self.applied {
            return Ok(false);
        }
        store.write(&self.file_name, &self.name, &self.text)?;
        self.applied = true;
        tracing::debug!(
            file = %self.file_name,
            snapshot = %self.name,
            "wrote type snapshot"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
