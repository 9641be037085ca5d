//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a balance change ("deposit" or "withdrawal").
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money added to the balance.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Money removed from the balance.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
}

impl From<punktwerk_core::balance::TransactionKind> for TransactionKind {
    fn from(kind: punktwerk_core::balance::TransactionKind) -> Self {
        match kind {
            punktwerk_core::balance::TransactionKind::Deposit => Self::Deposit,
            punktwerk_core::balance::TransactionKind::Withdrawal => Self::Withdrawal,
        }
    }
}

impl From<TransactionKind> for punktwerk_core::balance::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit,
            TransactionKind::Withdrawal => Self::Withdrawal,
        }
    }
}
