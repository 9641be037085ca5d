//! Transaction history route.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use punktwerk_db::HistoryRepository;

/// Creates the transactions router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions))
}

/// GET /transactions - The caller's balance mutations, newest first.
async fn list_transactions(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = HistoryRepository::new((*state.db).clone());

    match repo.transactions(user.user_id()).await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "transactions": rows }))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing transactions");
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
