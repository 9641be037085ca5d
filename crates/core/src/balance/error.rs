//! Error types for balance-change validation.

use thiserror::Error;

/// Errors that can occur while validating or applying a balance change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    /// Amount must be a positive number of minor currency units.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Description must be non-empty.
    #[error("Description must not be empty")]
    EmptyDescription,

    /// The resulting balance would be negative.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance before the change.
        balance: i64,
        /// Requested withdrawal amount.
        requested: i64,
    },

    /// The resulting balance would overflow the storage type.
    #[error("Amount out of range")]
    AmountOutOfRange,
}

impl BalanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// All validation and funds errors map to 400; they are rejected
    /// before any write happens.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BalanceError::NonPositiveAmount.error_code(),
            "NON_POSITIVE_AMOUNT"
        );
        assert_eq!(
            BalanceError::EmptyDescription.error_code(),
            "EMPTY_DESCRIPTION"
        );
        assert_eq!(
            BalanceError::InsufficientFunds {
                balance: 500,
                requested: 700,
            }
            .error_code(),
            "INSUFFICIENT_FUNDS"
        );
    }

    #[test]
    fn test_error_display() {
        let err = BalanceError::InsufficientFunds {
            balance: 500,
            requested: 700,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: balance 500, requested 700"
        );
    }
}
