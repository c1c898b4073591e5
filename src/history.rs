/// Default maximum number of snapshots kept in a [`TextHistory`].
pub const HISTORY_LIMIT: usize = 50;

/// Bounded, linear undo/redo log of full document snapshots.
///
/// The log always holds at least one entry and `cursor` always points at a
/// valid index. Recording a new snapshot while the cursor sits in the middle
/// of the log drops every entry after the cursor first.
#[derive(Debug, Clone, PartialEq)]
pub struct TextHistory {
    /// Snapshots, oldest first
    entries: Vec<String>,
    /// Index of the active snapshot
    cursor: usize,
    /// Maximum number of snapshots retained
    limit: usize,
}

impl Default for TextHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TextHistory {
    /// Creates a history seeded with a single empty snapshot
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Creates a seeded history that keeps at most `limit` snapshots
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: vec![String::new()],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Rebuilds a history from persisted parts.
    ///
    /// Persisted data is not trusted: an empty log is reseeded, a log longer
    /// than `limit` keeps its newest entries, and the cursor is clamped into
    /// range after the oldest entries are dropped.
    pub fn from_parts(entries: Vec<String>, cursor: usize, limit: usize) -> Self {
        let mut history = Self::with_limit(limit);
        if entries.is_empty() {
            return history;
        }

        let excess = entries.len().saturating_sub(history.limit);
        history.entries = entries.into_iter().skip(excess).collect();
        history.cursor = cursor
            .saturating_sub(excess)
            .min(history.entries.len() - 1);
        history
    }

    /// Records `value` as the newest snapshot.
    ///
    /// Returns `false` without touching the log when `value` equals the active
    /// snapshot.
    pub fn record(&mut self, value: &str) -> bool {
        if value == self.current() {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(value.to_owned());

        // Eviction can only happen with the cursor at the tail, so after the
        // shift the new snapshot sits at the last index.
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Moves one snapshot back, returning it, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Moves one snapshot forward, returning it, or `None` at the newest entry
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Returns true if there is an older snapshot to move to
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there is a newer snapshot to move to
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The active snapshot
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true, the log is always seeded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Resets the log to its seeded state
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(String::new());
        self.cursor = 0;
    }
}
