/// Linear snapshot history with a movable cursor.
///
/// Every committed edit appends a full snapshot. Undo and redo only move
/// the cursor; committing from the middle of the timeline discards the
/// snapshots after the cursor.
use crate::config::HistoryConfig;

/// Where the cursor sits relative to the ends of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPosition {
    /// Cursor at index 0. Nothing to undo.
    AtStart,
    /// Both undo and redo are available.
    MidHistory,
    /// Cursor at the last index. Nothing to redo.
    AtHead,
}

/// Bounded linear undo/redo history over immutable snapshots.
///
/// The timeline is never empty: index 0 holds the initial snapshot the
/// session was seeded with (or the oldest survivor once a cap evicts).
#[derive(Clone)]
pub struct History<T> {
    /// Snapshots, oldest first.
    timeline: Vec<T>,
    /// Index of the active snapshot. Always `< timeline.len()`.
    cursor: usize,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl<T> std::fmt::Debug for History<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("len", &self.timeline.len())
            .field("cursor", &self.cursor)
            .field("max_snapshots", &self.config.max_snapshots)
            .finish()
    }
}

impl<T> History<T> {
    /// Creates a history seeded with `initial` as its only snapshot.
    pub fn new(initial: T, config: HistoryConfig) -> Self {
        Self {
            timeline: vec![initial],
            cursor: 0,
            config,
        }
    }

    /// Creates an unbounded history.
    pub fn unbounded(initial: T) -> Self {
        Self::new(initial, HistoryConfig::unbounded())
    }

    /// Records a new snapshot after the active one.
    ///
    /// Snapshots after the cursor are dropped first, so the redo branch
    /// is gone once this returns. Equal snapshots are not deduplicated.
    pub fn commit(&mut self, snapshot: T) {
        let discarded = self.timeline.len() - (self.cursor + 1);
        self.timeline.truncate(self.cursor + 1);
        self.timeline.push(snapshot);
        self.cursor = self.timeline.len() - 1;

        if discarded > 0 {
            tracing::debug!("Discarded {discarded} redo snapshot(s) on commit");
        }

        self.enforce_cap();
    }

    /// Steps back one snapshot. No-op at the start of the timeline.
    pub fn undo(&mut self) -> &T {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Steps forward one snapshot. No-op at the head of the timeline.
    pub fn redo(&mut self) -> &T {
        if self.cursor + 1 < self.timeline.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// The active snapshot.
    pub fn current(&self) -> &T {
        &self.timeline[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.timeline.len()
    }

    /// Number of snapshots retained, including the active one.
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    /// Never true: the timeline always holds the active snapshot.
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Index of the active snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// How many `undo` calls would change the active snapshot.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// How many `redo` calls would change the active snapshot.
    pub fn redo_depth(&self) -> usize {
        self.timeline.len() - 1 - self.cursor
    }

    /// Classifies the cursor. A single-snapshot timeline reports `AtStart`.
    pub fn position(&self) -> HistoryPosition {
        if self.cursor == 0 {
            HistoryPosition::AtStart
        } else if self.can_redo() {
            HistoryPosition::MidHistory
        } else {
            HistoryPosition::AtHead
        }
    }

    /// All retained snapshots, oldest first.
    pub fn timeline(&self) -> &[T] {
        &self.timeline
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Drops every snapshot and re-seeds the timeline with `initial`.
    pub fn reset(&mut self, initial: T) {
        self.timeline.clear();
        self.timeline.push(initial);
        self.cursor = 0;
    }

    /// Evicts the oldest snapshots while the timeline exceeds the cap.
    fn enforce_cap(&mut self) {
        let Some(cap) = self.config.effective_cap() else {
            return;
        };
        if self.timeline.len() <= cap {
            return;
        }

        let excess = self.timeline.len() - cap;
        self.timeline.drain(..excess);
        self.cursor -= excess;
        tracing::debug!("Evicted {excess} oldest snapshot(s), cap is {cap}");
    }
}
