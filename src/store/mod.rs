//! Session state persistence.
//!
//! Quiz progress and the points ledger are stored per session id behind the
//! [`StateRepository`] trait, with implementations for:
//! - in-memory maps (tests, ephemeral deployments)
//! - redb (embedded file-based storage)

#[cfg(feature = "storage-file")]
mod file;

#[cfg(feature = "storage-file")]
pub use file::FileStore;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::quiz::{PointsLedger, QuizProgress};

/// Error type for state repository operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "storage-file")]
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[cfg(feature = "storage-file")]
    #[error("Database creation error: {0}")]
    DatabaseCreation(#[from] redb::DatabaseError),

    #[cfg(feature = "storage-file")]
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[cfg(feature = "storage-file")]
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[cfg(feature = "storage-file")]
    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[cfg(feature = "storage-file")]
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session update was not applied")]
    NotApplied,
}

/// Load/save/clear access to per-session quiz state
pub trait StateRepository: Send + Sync {
    /// Stored progress, `None` if the session has none
    fn load_progress(&self, session_id: &str) -> Result<Option<QuizProgress>, StoreError>;

    fn save_progress(&self, session_id: &str, progress: &QuizProgress) -> Result<(), StoreError>;

    /// Remove stored progress; unknown sessions are a no-op
    fn clear_progress(&self, session_id: &str) -> Result<(), StoreError>;

    /// Stored ledger, empty if the session has none
    fn load_ledger(&self, session_id: &str) -> Result<PointsLedger, StoreError>;

    fn save_ledger(&self, session_id: &str, ledger: &PointsLedger) -> Result<(), StoreError>;

    /// Remove the stored ledger; unknown sessions are a no-op
    fn clear_ledger(&self, session_id: &str) -> Result<(), StoreError>;

    /// Load a session's progress and ledger, hand both to `apply`, and write
    /// them back together if it returns `true`.
    ///
    /// Updates of the same store are serialized, so no other update can
    /// interleave between the read and the write.
    fn apply_session(
        &self,
        session_id: &str,
        apply: &mut dyn FnMut(&mut QuizProgress, &mut PointsLedger) -> bool,
    ) -> Result<(), StoreError>;

    /// Fails if the backing store cannot be read
    fn check(&self) -> Result<(), StoreError> {
        self.load_progress(READINESS_KEY).map(|_| ())
    }
}

/// Session id read by the default readiness check
const READINESS_KEY: &str = "__readiness__";

impl dyn StateRepository {
    /// Run `update` on a session's progress and ledger as one atomic step.
    ///
    /// Nothing is written when `update` returns an error.
    pub fn update_session<T, E>(
        &self,
        session_id: &str,
        update: impl FnOnce(&mut QuizProgress, &mut PointsLedger) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut update = Some(update);
        let mut result = None;

        self.apply_session(session_id, &mut |progress, ledger| {
            let Some(update) = update.take() else {
                return false;
            };
            let outcome = update(progress, ledger);
            let commit = outcome.is_ok();
            result = Some(outcome);
            commit
        })?;

        result.unwrap_or_else(|| Err(E::from(StoreError::NotApplied)))
    }
}

/// Helper trait to recover from poisoned RwLocks
trait RecoverableLock<T> {
    fn read_or_recover(&self) -> RwLockReadGuard<'_, T>;
    fn write_or_recover(&self) -> RwLockWriteGuard<'_, T>;
}

impl<T> RecoverableLock<T> for RwLock<T> {
    fn read_or_recover(&self) -> RwLockReadGuard<'_, T> {
        self.read().unwrap_or_else(|poisoned| {
            warn!("RwLock was poisoned during read, recovering");
            poisoned.into_inner()
        })
    }

    fn write_or_recover(&self) -> RwLockWriteGuard<'_, T> {
        self.write().unwrap_or_else(|poisoned| {
            warn!("RwLock was poisoned during write, recovering");
            poisoned.into_inner()
        })
    }
}

/// In-memory repository
#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: RwLock<HashMap<String, QuizProgress>>,
    ledgers: RwLock<HashMap<String, PointsLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for MemoryStore {
    fn load_progress(&self, session_id: &str) -> Result<Option<QuizProgress>, StoreError> {
        Ok(self.progress.read_or_recover().get(session_id).cloned())
    }

    fn save_progress(&self, session_id: &str, progress: &QuizProgress) -> Result<(), StoreError> {
        self.progress
            .write_or_recover()
            .insert(session_id.to_string(), progress.clone());
        Ok(())
    }

    fn clear_progress(&self, session_id: &str) -> Result<(), StoreError> {
        self.progress.write_or_recover().remove(session_id);
        Ok(())
    }

    fn load_ledger(&self, session_id: &str) -> Result<PointsLedger, StoreError> {
        Ok(self
            .ledgers
            .read_or_recover()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_ledger(&self, session_id: &str, ledger: &PointsLedger) -> Result<(), StoreError> {
        self.ledgers
            .write_or_recover()
            .insert(session_id.to_string(), ledger.clone());
        Ok(())
    }

    fn clear_ledger(&self, session_id: &str) -> Result<(), StoreError> {
        self.ledgers.write_or_recover().remove(session_id);
        Ok(())
    }

    fn apply_session(
        &self,
        session_id: &str,
        apply: &mut dyn FnMut(&mut QuizProgress, &mut PointsLedger) -> bool,
    ) -> Result<(), StoreError> {
        // Lock order: progress, then ledgers
        let mut progress_map = self.progress.write_or_recover();
        let mut ledgers = self.ledgers.write_or_recover();

        let mut progress = progress_map.get(session_id).cloned().unwrap_or_default();
        let mut ledger = ledgers.get(session_id).cloned().unwrap_or_default();

        if apply(&mut progress, &mut ledger) {
            progress_map.insert(session_id.to_string(), progress);
            ledgers.insert(session_id.to_string(), ledger);
        }
        Ok(())
    }
}
