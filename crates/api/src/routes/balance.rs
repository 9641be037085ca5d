//! Balance mutation route.
//!
//! The single write endpoint: cashiers deposit into or withdraw from a
//! member's balance. Point awards and achievement unlocks ride along in
//! the same database transaction.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::middleware::auth::{AuthUser, require_cashier};
use punktwerk_core::balance::{BalanceChange, TransactionKind};
use punktwerk_db::entities::{achievements, transactions};
use punktwerk_db::repositories::balance::{BalanceError, BalanceRepository};

/// Creates the balance router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/balance", post(apply_balance_change))
}

/// Balance change request payload.
#[derive(Debug, Deserialize)]
pub struct BalanceChangeRequest {
    /// Target member.
    pub user_id: i32,
    /// Amount in minor currency units; must be positive.
    pub amount: i64,
    /// "deposit" or "withdrawal".
    pub kind: TransactionKind,
    /// Human-readable reason shown in the member's history.
    pub description: String,
}

/// Balance change response payload.
#[derive(Debug, Serialize)]
pub struct BalanceChangeResponse {
    /// Member state after the change.
    pub user: UserBalance,
    /// The audit row written for this change.
    pub transaction: transactions::Model,
    /// Formula points credited for a deposit.
    pub points_awarded: i64,
    /// Achievements unlocked by this change.
    pub unlocked: Vec<achievements::Model>,
}

/// Balance and points snapshot in responses.
#[derive(Debug, Serialize)]
pub struct UserBalance {
    /// User ID.
    pub id: i32,
    /// Cash balance in minor currency units.
    pub balance: i64,
    /// Loyalty points balance.
    pub points: i64,
}

/// POST /balance - Apply a deposit or withdrawal (cashier only).
async fn apply_balance_change(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BalanceChangeRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_cashier(&user) {
        return response;
    }

    let repo = BalanceRepository::new((*state.db).clone());
    let change = BalanceChange {
        user_id: payload.user_id,
        amount: payload.amount,
        kind: payload.kind,
        description: payload.description,
    };

    match repo.apply_balance_change(&change).await {
        Ok(outcome) => {
            info!(
                cashier_id = user.user_id(),
                user_id = outcome.user.id,
                amount = change.amount,
                kind = %change.kind,
                points_awarded = outcome.points_awarded,
                unlocked = outcome.unlocked.len(),
                "Balance change applied"
            );

            (
                StatusCode::OK,
                Json(BalanceChangeResponse {
                    user: UserBalance {
                        id: outcome.user.id,
                        balance: outcome.user.balance,
                        points: outcome.user.points,
                    },
                    transaction: outcome.transaction,
                    points_awarded: outcome.points_awarded,
                    unlocked: outcome.unlocked,
                }),
            )
                .into_response()
        }
        Err(BalanceError::UserNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "user_not_found",
                "message": format!("No user with id {id}")
            })),
        )
            .into_response(),
        Err(BalanceError::Rejected(e)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": e.error_code(),
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(BalanceError::Database(e)) => {
            error!(error = %e, "Database error applying balance change");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                })),
            )
                .into_response()
        }
    }
}
