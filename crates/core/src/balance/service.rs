//! Pure balance-change logic: validation, new-balance computation, and
//! the deposit-to-points formula.
//!
//! Nothing in this module performs I/O; the persistence layer calls these
//! functions inside its database transaction.

use super::error::BalanceError;
use super::types::{BalanceChange, TransactionKind};

/// One loyalty point is awarded per this many minor currency units deposited.
pub const CENTS_PER_POINT: i64 = 200;

/// Flat bonus awarded for each achievement unlock.
pub const ACHIEVEMENT_BONUS_POINTS: i64 = 5;

/// Validates a balance change before any state is read or written.
///
/// # Errors
///
/// Returns `BalanceError::NonPositiveAmount` for zero or negative amounts,
/// `BalanceError::EmptyDescription` for blank descriptions.
pub fn validate(change: &BalanceChange) -> Result<(), BalanceError> {
    if change.amount <= 0 {
        return Err(BalanceError::NonPositiveAmount);
    }
    if change.description.trim().is_empty() {
        return Err(BalanceError::EmptyDescription);
    }
    Ok(())
}

/// Computes the balance after applying a change.
///
/// # Errors
///
/// Returns `BalanceError::InsufficientFunds` if a withdrawal would drive
/// the balance negative, `BalanceError::AmountOutOfRange` on overflow.
pub fn new_balance(current: i64, change: &BalanceChange) -> Result<i64, BalanceError> {
    match change.kind {
        TransactionKind::Deposit => current
            .checked_add(change.amount)
            .ok_or(BalanceError::AmountOutOfRange),
        TransactionKind::Withdrawal => {
            let next = current
                .checked_sub(change.amount)
                .ok_or(BalanceError::AmountOutOfRange)?;
            if next < 0 {
                return Err(BalanceError::InsufficientFunds {
                    balance: current,
                    requested: change.amount,
                });
            }
            Ok(next)
        }
    }
}

/// Points earned by a deposit: one point per full 2.00 currency units,
/// truncating the remainder.
#[must_use]
pub const fn points_for_deposit(amount: i64) -> i64 {
    amount / CENTS_PER_POINT
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn change(amount: i64, kind: TransactionKind) -> BalanceChange {
        BalanceChange {
            user_id: 1,
            amount,
            kind,
            description: "test".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_positive_deposit() {
        assert!(validate(&change(100, TransactionKind::Deposit)).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(-1000)]
    fn test_validate_rejects_non_positive_amount(#[case] amount: i64) {
        assert_eq!(
            validate(&change(amount, TransactionKind::Deposit)),
            Err(BalanceError::NonPositiveAmount)
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_validate_rejects_empty_description(#[case] description: &str) {
        let mut c = change(100, TransactionKind::Withdrawal);
        c.description = description.to_string();
        assert_eq!(validate(&c), Err(BalanceError::EmptyDescription));
    }

    #[test]
    fn test_deposit_increases_balance() {
        let next = new_balance(500, &change(1000, TransactionKind::Deposit)).unwrap();
        assert_eq!(next, 1500);
    }

    #[test]
    fn test_withdrawal_decreases_balance() {
        let next = new_balance(1000, &change(300, TransactionKind::Withdrawal)).unwrap();
        assert_eq!(next, 700);
    }

    #[test]
    fn test_withdrawal_to_zero_is_allowed() {
        let next = new_balance(500, &change(500, TransactionKind::Withdrawal)).unwrap();
        assert_eq!(next, 0);
    }

    #[test]
    fn test_overdraw_is_rejected() {
        let result = new_balance(500, &change(700, TransactionKind::Withdrawal));
        assert_eq!(
            result,
            Err(BalanceError::InsufficientFunds {
                balance: 500,
                requested: 700,
            })
        );
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let result = new_balance(i64::MAX, &change(1, TransactionKind::Deposit));
        assert_eq!(result, Err(BalanceError::AmountOutOfRange));
    }

    #[rstest]
    #[case(199, 0)]
    #[case(200, 1)]
    #[case(250, 1)]
    #[case(399, 1)]
    #[case(400, 2)]
    #[case(1000, 5)]
    fn test_points_formula(#[case] amount: i64, #[case] expected: i64) {
        assert_eq!(points_for_deposit(amount), expected);
    }

    proptest! {
        /// A withdrawal never produces a negative balance: either the
        /// result is non-negative or the request is rejected.
        #[test]
        fn prop_balance_never_negative(
            current in 0i64..1_000_000_000,
            amount in 1i64..1_000_000_000,
        ) {
            let c = change(amount, TransactionKind::Withdrawal);
            match new_balance(current, &c) {
                Ok(next) => prop_assert!(next >= 0),
                Err(BalanceError::InsufficientFunds { balance, requested }) => {
                    prop_assert_eq!(balance, current);
                    prop_assert_eq!(requested, amount);
                    prop_assert!(amount > current);
                }
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
        }

        /// The points formula truncates: `points * 200 <= amount < (points + 1) * 200`.
        #[test]
        fn prop_points_formula_truncates(amount in 0i64..1_000_000_000) {
            let points = points_for_deposit(amount);
            prop_assert!(points * CENTS_PER_POINT <= amount);
            prop_assert!((points + 1) * CENTS_PER_POINT > amount);
        }
    }
}
