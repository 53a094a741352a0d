//! Transaction log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bankline_core::Money;

/// Kind tag of a transaction log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Interest,
    Fee,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::Interest => "INTEREST",
            TransactionKind::Fee => "FEE",
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an account's transaction history (immutable once logged).
///
/// Renders as `<KIND>: $<amount>`, e.g. `FEE: $1.50`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// 1-based position in the account's history.
    pub sequence: u64,
    pub kind: TransactionKind,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

impl core::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: ${}", self.kind, self.amount)
    }
}
