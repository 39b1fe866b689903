//! File-backed state repository using redb.
//!
//! Each blob kind gets its own table; values are the JSON documents the
//! browser client keeps in local storage, so the two stay interchangeable.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{StateRepository, StoreError};
use crate::quiz::{PointsLedger, QuizProgress};

type BlobTable = TableDefinition<'static, &'static str, &'static [u8]>;

/// Quiz progress per session
const PROGRESS_TABLE: BlobTable = TableDefinition::new("quiz_progress");

/// Points ledger per session
const LEDGER_TABLE: BlobTable = TableDefinition::new("points_ledger");

/// redb-backed repository
pub struct FileStore {
    db: Database,
}

impl FileStore {
    /// Create or open the database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        // Ensure tables exist so reads on a fresh file don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PROGRESS_TABLE)?;
            let _ = write_txn.open_table(LEDGER_TABLE)?;
        }
        write_txn.commit()?;

        info!(path = %path.display(), "State store opened");

        Ok(Self { db })
    }

    fn get<T: DeserializeOwned>(&self, table: BlobTable, key: &str) -> Result<Option<T>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        read_blob(&table, key)
    }

    fn put<T: Serialize>(&self, table: BlobTable, key: &str, value: &T) -> Result<(), StoreError> {
        let data = serde_json::to_vec(value)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table)?;
            table.insert(key, data.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    fn delete(&self, table: BlobTable, key: &str) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed;
        {
            let mut table = write_txn.open_table(table)?;
            removed = table.remove(key)?.is_some();
        }
        write_txn.commit()?;

        if removed {
            debug!(session_id = %key, "Session blob cleared");
        }

        Ok(())
    }
}

/// Decode a JSON blob from any readable table
fn read_blob<T, R>(table: &R, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    R: ReadableTable<&'static str, &'static [u8]>,
{
    match table.get(key)? {
        Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
        None => Ok(None),
    }
}

impl StateRepository for FileStore {
    fn load_progress(&self, session_id: &str) -> Result<Option<QuizProgress>, StoreError> {
        self.get(PROGRESS_TABLE, session_id)
    }

    fn save_progress(&self, session_id: &str, progress: &QuizProgress) -> Result<(), StoreError> {
        self.put(PROGRESS_TABLE, session_id, progress)
    }

    fn clear_progress(&self, session_id: &str) -> Result<(), StoreError> {
        self.delete(PROGRESS_TABLE, session_id)
    }

    fn load_ledger(&self, session_id: &str) -> Result<PointsLedger, StoreError> {
        Ok(self.get(LEDGER_TABLE, session_id)?.unwrap_or_default())
    }

    fn save_ledger(&self, session_id: &str, ledger: &PointsLedger) -> Result<(), StoreError> {
        self.put(LEDGER_TABLE, session_id, ledger)
    }

    fn clear_ledger(&self, session_id: &str) -> Result<(), StoreError> {
        self.delete(LEDGER_TABLE, session_id)
    }

    fn apply_session(
        &self,
        session_id: &str,
        apply: &mut dyn FnMut(&mut QuizProgress, &mut PointsLedger) -> bool,
    ) -> Result<(), StoreError> {
        // redb allows one write transaction at a time, so the read below and
        // the write after it cannot interleave with another update
        let write_txn = self.db.begin_write()?;
        let committed = {
            let mut progress_table = write_txn.open_table(PROGRESS_TABLE)?;
            let mut ledger_table = write_txn.open_table(LEDGER_TABLE)?;

            let mut progress: QuizProgress = read_blob(&progress_table, session_id)?.unwrap_or_default();
            let mut ledger: PointsLedger = read_blob(&ledger_table, session_id)?.unwrap_or_default();

            if apply(&mut progress, &mut ledger) {
                let progress_data = serde_json::to_vec(&progress)?;
                let ledger_data = serde_json::to_vec(&ledger)?;
                progress_table.insert(session_id, progress_data.as_slice())?;
                ledger_table.insert(session_id, ledger_data.as_slice())?;
                true
            } else {
                false
            }
        };

        if committed {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }

        debug!(session_id = %session_id, committed, "Session update applied");
        Ok(())
    }

    fn check(&self) -> Result<(), StoreError> {
        let read_txn = self.db.begin_read()?;
        read_txn.open_table(PROGRESS_TABLE)?;
        read_txn.open_table(LEDGER_TABLE)?;
        Ok(())
    }
}
