//! Persistence boundary for named mazes.
//!
//! The real backend is an authenticated HTTP service; the core only needs
//! the operations below, keyed by an opaque owner string (the
//! authenticated user). [`MemoryStore`] is the in-process implementation
//! used by tests and offline sessions.

use crate::codec::MazeRecord;
use crate::error::StoreError;

/// Identifier assigned by the store on save.
pub type MazeId = u64;

/// Listing entry for a saved maze.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeSummary {
    pub id: MazeId,
    pub name: String,
    pub rows: i32,
    pub cols: i32,
    /// Monotonic creation stamp, larger is newer.
    pub created: u64,
}

/// Per-owner storage of named maze records.
pub trait MazeStore {
    /// Save a maze under `name`. Names are unique per owner.
    fn save(&mut self, owner: &str, name: &str, record: MazeRecord) -> Result<MazeId, StoreError>;

    /// All mazes of `owner`, newest first.
    fn list(&self, owner: &str) -> Vec<MazeSummary>;

    fn load(&self, owner: &str, id: MazeId) -> Result<MazeRecord, StoreError>;

    fn delete(&mut self, owner: &str, id: MazeId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct Entry {
    owner: String,
    summary: MazeSummary,
    record: MazeRecord,
}

/// A [`MazeStore`] kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
    next_id: MazeId,
    clock: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, owner: &str, id: MazeId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.owner == owner && e.summary.id == id)
    }
}

impl MazeStore for MemoryStore {
    fn save(&mut self, owner: &str, name: &str, record: MazeRecord) -> Result<MazeId, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self
            .entries
            .iter()
            .any(|e| e.owner == owner && e.summary.name == name)
        {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        self.next_id += 1;
        self.clock += 1;
        let id = self.next_id;
        log::debug!("saving maze {name:?} ({}x{}) as {id}", record.rows, record.cols);
        self.entries.push(Entry {
            owner: owner.to_string(),
            summary: MazeSummary {
                id,
                name: name.to_string(),
                rows: record.rows,
                cols: record.cols,
                created: self.clock,
            },
            record,
        });
        Ok(id)
    }

    fn list(&self, owner: &str) -> Vec<MazeSummary> {
        let mut out: Vec<MazeSummary> = self
            .entries
            .iter()
            .filter(|e| e.owner == owner)
            .map(|e| e.summary.clone())
            .collect();
        out.sort_by(|a, b| b.created.cmp(&a.created));
        out
    }

    fn load(&self, owner: &str, id: MazeId) -> Result<MazeRecord, StoreError> {
        self.find(owner, id)
            .map(|i| self.entries[i].record.clone())
            .ok_or(StoreError::NotFound(id))
    }

    fn delete(&mut self, owner: &str, id: MazeId) -> Result<(), StoreError> {
        let i = self.find(owner, id).ok_or(StoreError::NotFound(id))?;
        self.entries.remove(i);
        Ok(())
    }
}
