//! Domain types for balance changes.

use serde::{Deserialize, Serialize};

/// Direction of a balance change.
///
/// The amount itself is always positive; the direction is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money added to the balance.
    Deposit,
    /// Money removed from the balance.
    Withdrawal,
}

impl TransactionKind {
    /// Returns the wire representation ("deposit" / "withdrawal").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested balance mutation, validated before any write happens.
#[derive(Debug, Clone)]
pub struct BalanceChange {
    /// The user whose balance is mutated.
    pub user_id: i32,
    /// Amount in minor currency units; must be positive.
    pub amount: i64,
    /// Deposit or withdrawal.
    pub kind: TransactionKind,
    /// Free-text description for the audit record; must be non-empty.
    pub description: String,
}

/// Minimal user state the engine reads and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserSnapshot {
    /// User ID.
    pub id: i32,
    /// Cash balance in minor currency units.
    pub balance: i64,
    /// Loyalty points balance.
    pub points: i64,
}
