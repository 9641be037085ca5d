//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a user holds within the system.
pub const ROLE_CASHIER: &str = "cashier";
/// Default role for registered members.
pub const ROLE_MEMBER: &str = "member";

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i32,
    /// User's role ("cashier" or "member").
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: i32, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.sub
    }

    /// Returns true if the token belongs to a cashier.
    #[must_use]
    pub fn is_cashier(&self) -> bool {
        self.role == ROLE_CASHIER
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
    /// User full name.
    pub full_name: String,
}

/// Token refresh request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token issued at login.
    pub refresh_token: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated user info.
    pub user: UserInfo,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// User info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i32,
    /// User email.
    pub email: String,
    /// User full name.
    pub full_name: String,
    /// Cash balance in minor currency units.
    pub balance: i64,
    /// Loyalty points balance.
    pub points: i64,
    /// Whether this user holds cashier authority.
    pub is_cashier: bool,
    /// Opaque QR code identifier for scan-initiated lookups.
    pub qr_code_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_roles() {
        let expires = Utc::now() + Duration::minutes(15);
        let cashier = Claims::new(1, ROLE_CASHIER, expires);
        let member = Claims::new(2, ROLE_MEMBER, expires);

        assert!(cashier.is_cashier());
        assert!(!member.is_cashier());
        assert_eq!(cashier.user_id(), 1);
        assert_eq!(member.user_id(), 2);
    }
}
