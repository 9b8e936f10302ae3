/// Tier-list editing session.
///
/// A `TierEditor` pairs the board history with the edit rules: every
/// successful edit commits a new snapshot, undo and redo move through
/// the history, and the persistence side reads `current()`.
use musicbucket_config::AppConfig;

use crate::board::{Edit, EditError, TierBoard};
use crate::history::{history_config, History, HistoryPosition};

/// One editing session over a single board.
#[derive(Debug)]
pub struct TierEditor {
    history: History<TierBoard>,
    /// Board last handed to persistence.
    saved: TierBoard,
}

impl TierEditor {
    /// Wraps an existing history. The history's active snapshot is
    /// treated as already saved.
    pub fn new(history: History<TierBoard>) -> Self {
        let saved = history.current().clone();
        Self { history, saved }
    }

    /// Starts a session on `board` with history settings from `config`.
    pub fn open(board: TierBoard, config: &AppConfig) -> Self {
        Self::new(History::new(board, history_config(config)))
    }

    /// Applies an edit and commits the result.
    ///
    /// On error nothing is committed and the active board is unchanged.
    pub fn apply(&mut self, edit: Edit) -> Result<&TierBoard, EditError> {
        let next = self.history.current().apply(&edit)?;
        tracing::debug!(?edit, "Committing edit");
        self.history.commit(next);
        Ok(self.history.current())
    }

    pub fn undo(&mut self) -> &TierBoard {
        if !self.history.can_undo() {
            tracing::debug!("Undo requested at start of history");
        }
        self.history.undo()
    }

    pub fn redo(&mut self) -> &TierBoard {
        if !self.history.can_redo() {
            tracing::debug!("Redo requested at head of history");
        }
        self.history.redo()
    }

    /// The board that should be shown and saved.
    pub fn current(&self) -> &TierBoard {
        self.history.current()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn position(&self) -> HistoryPosition {
        self.history.position()
    }

    pub fn history(&self) -> &History<TierBoard> {
        &self.history
    }

    /// Whether `current()` differs from what was last saved.
    ///
    /// Compares content, so undoing back to the saved board is clean.
    pub fn is_dirty(&self) -> bool {
        &self.saved != self.history.current()
    }

    /// Records `current()` as saved.
    pub fn mark_saved(&mut self) {
        self.saved = self.history.current().clone();
    }

    /// Ends the session, returning the board to persist.
    pub fn into_current(self) -> TierBoard {
        self.history.current().clone()
    }
}
