//! Balance-change validation and the deposit-to-points formula.
//!
//! All monetary amounts are integer minor currency units (cents).

mod error;
mod service;
mod types;

pub use error::BalanceError;
pub use service::{
    new_balance, points_for_deposit, validate, ACHIEVEMENT_BONUS_POINTS, CENTS_PER_POINT,
};
pub use types::{BalanceChange, TransactionKind, UserSnapshot};
