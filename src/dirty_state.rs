//! Unsaved-change tracking for a plugin session.

/// Counts document-dirtying changes and how many of them have been saved.
///
/// `saved_change_count <= change_count` always holds: the saved count only ever
/// catches up with the change count, it never runs ahead of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyStateTracker {
    change_count: u64,
    saved_change_count: u64,
}

impl DirtyStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one document-dirtying change.
    pub fn record_change(&mut self) {
        self.change_count += 1;
    }

    /// Synchronises the saved count with the change count after a save.
    pub fn mark_saved(&mut self) {
        self.saved_change_count = self.change_count;
    }

    /// Whether the user should be prompted before the document is closed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.change_count > self.saved_change_count
    }

    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    pub fn saved_change_count(&self) -> u64 {
        self.saved_change_count
    }
}
