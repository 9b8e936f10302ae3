pub mod board;
pub mod editor;
pub mod history;
pub mod script;
pub mod store;

pub use board::{Edit, EditError, ItemRef, Location, Tier, TierBoard, TierId};
pub use editor::TierEditor;
pub use script::{parse_line, run_script, Command, ScriptError, ScriptOutcome};
pub use store::{BoardStore, StoredBoard};
