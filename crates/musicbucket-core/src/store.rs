/// Board persistence backed by redb.
///
/// Stores only the active snapshot of each tier list, never the undo
/// history. One table:
/// - `boards`: list id → bincode-serialized `StoredBoard`
use std::path::Path;

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::board::TierBoard;

/// Board table: list id → bincode(`StoredBoard`).
const BOARDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("boards");

/// File name of the database inside the data directory.
const DB_FILE: &str = "boards.redb";

/// A saved board plus when it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBoard {
    pub board: TierBoard,
    /// Unix time in milliseconds.
    pub saved_at_ms: i64,
}

impl StoredBoard {
    /// Save time in local time, for display.
    pub fn saved_at(&self) -> Option<chrono::DateTime<chrono::Local>> {
        chrono::DateTime::from_timestamp_millis(self.saved_at_ms)
            .map(|utc| utc.with_timezone(&chrono::Local))
    }
}

/// Persistence layer for tier lists.
pub struct BoardStore {
    db: Database,
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore").finish()
    }
}

impl BoardStore {
    /// Opens or creates the board database in `data_dir`.
    ///
    /// Creates the directory and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join(DB_FILE);
        let db = Database::create(&db_path)
            .with_context(|| format!("Failed to open board database: {}", db_path.display()))?;

        // Ensure tables exist
        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(BOARDS_TABLE)
                .context("Failed to create boards table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        tracing::debug!("Opened board store at {}", db_path.display());
        Ok(Self { db })
    }

    /// Saves `board` under `list_id`, replacing any previous save.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write transaction fails.
    pub fn save(&self, list_id: &str, board: &TierBoard) -> Result<StoredBoard> {
        let stored = StoredBoard {
            board: board.clone(),
            saved_at_ms: chrono::Utc::now().timestamp_millis(),
        };
        let bytes = bincode::serialize(&stored).context("Failed to serialize board")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(BOARDS_TABLE)
                .context("Failed to open boards table")?;
            table
                .insert(list_id, bytes.as_slice())
                .context("Failed to insert board")?;
        }
        write_txn.commit().context("Failed to commit board")?;

        tracing::debug!(
            "Saved board {list_id} ({} tiers, {} items)",
            board.tiers.len(),
            board.item_count()
        );
        Ok(stored)
    }

    /// Loads the board saved under `list_id`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction or deserialization fails.
    pub fn load(&self, list_id: &str) -> Result<Option<StoredBoard>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(BOARDS_TABLE)
            .context("Failed to open boards table")?;

        match table.get(list_id).context("Failed to read board")? {
            Some(guard) => {
                let stored: StoredBoard = bincode::deserialize(guard.value())
                    .with_context(|| format!("Failed to deserialize board {list_id}"))?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    /// Deletes the board saved under `list_id`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn delete(&self, list_id: &str) -> Result<bool> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        let existed;
        {
            let mut table = write_txn
                .open_table(BOARDS_TABLE)
                .context("Failed to open boards table")?;
            existed = table
                .remove(list_id)
                .context("Failed to remove board")?
                .is_some();
        }
        write_txn.commit().context("Failed to commit deletion")?;
        Ok(existed)
    }

    /// Lists all stored list ids, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn list(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(BOARDS_TABLE)
            .context("Failed to open boards table")?;

        let mut ids = Vec::new();
        for entry in table.iter().context("Failed to iterate boards table")? {
            let (key_guard, _) = entry.context("Failed to read board entry")?;
            ids.push(key_guard.value().to_string());
        }
        Ok(ids)
    }
}
