use crate::grid::Grid;

/// Snapshot log backing single-step undo.
///
/// Holds serialized sheets, oldest first. The last entry always mirrors the
/// sheet after the most recent committed stroke or load, and the log never
/// becomes empty: the first entry is the floor undo cannot go past.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHistory {
    snapshots: Vec<String>,
}

impl SnapshotHistory {
    pub fn new(initial: String) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    /// Drops all entries and seeds the log with `initial`.
    pub fn reset(&mut self, initial: String) {
        self.snapshots.clear();
        self.snapshots.push(initial);
    }

    /// Records the current state of `grid`.
    pub fn commit(&mut self, grid: &Grid) {
        self.snapshots.push(grid.to_snapshot());
    }

    /// Steps back one entry and returns the snapshot that is now current.
    /// At the floor nothing is removed.
    pub fn undo(&mut self) -> &str {
        if self.snapshots.len() > 1 {
            self.snapshots.pop();
        }
        self.current()
    }

    /// The entry [`SnapshotHistory::undo`] would step back to, if any.
    pub fn previous(&self) -> Option<&str> {
        let len = self.snapshots.len();
        if len > 1 {
            self.snapshots.get(len - 2).map(String::as_str)
        } else {
            None
        }
    }

    pub fn current(&self) -> &str {
        // Never empty: seeded on construction and pops are guarded.
        self.snapshots.last().map(String::as_str).unwrap_or_default()
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.len() > 1
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
