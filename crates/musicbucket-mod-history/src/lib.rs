/// Snapshot-based undo/redo history.
///
/// Provides a `History` that keeps full snapshots of an editable document
/// on a linear timeline with a cursor. History lives only for one editing
/// session; persisting the active snapshot is left to the caller.
pub mod config;
pub mod manager;

pub use config::HistoryConfig;
pub use manager::{History, HistoryPosition};
