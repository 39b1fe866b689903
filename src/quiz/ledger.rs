//! Points ledger.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Direction of a points transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earn,
    /// Written by clients that redeem points; the service only earns
    Spend,
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Action that produced the entry, e.g. `stage_complete:1`
    pub action: String,
    pub points: u32,
    /// Unix timestamp (seconds)
    pub timestamp: i64,
}

impl PointsTransaction {
    /// Signed contribution to the balance
    pub fn signed_points(&self) -> i64 {
        match self.kind {
            TransactionKind::Earn => i64::from(self.points),
            TransactionKind::Spend => -i64::from(self.points),
        }
    }
}

/// Append-only list of point transactions, serialized as a plain JSON array
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsLedger {
    transactions: Vec<PointsTransaction>,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record earned points at the current time
    pub fn earn(&mut self, action: impl Into<String>, points: u32) -> &PointsTransaction {
        self.push(TransactionKind::Earn, action.into(), points, chrono::Utc::now().timestamp())
    }

    fn push(&mut self, kind: TransactionKind, action: String, points: u32, timestamp: i64) -> &PointsTransaction {
        debug!(?kind, action = %action, points, "Points transaction recorded");
        self.transactions.push(PointsTransaction {
            kind,
            action,
            points,
            timestamp,
        });
        &self.transactions[self.transactions.len() - 1]
    }

    /// Current balance
    pub fn balance(&self) -> i64 {
        self.transactions.iter().map(PointsTransaction::signed_points).sum()
    }

    /// True if any transaction was recorded for `action`
    pub fn has_action(&self, action: &str) -> bool {
        self.transactions.iter().any(|t| t.action == action)
    }

    pub fn transactions(&self) -> &[PointsTransaction] {
        &self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
