//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod balance;
pub mod history;
pub mod user;

pub use balance::{BalanceChangeOutcome, BalanceError, BalanceRepository};
pub use history::HistoryRepository;
pub use user::UserRepository;
