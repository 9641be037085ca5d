//! Point award history route.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use punktwerk_db::HistoryRepository;

/// Creates the points router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/points", get(list_point_awards))
}

/// GET /points - The caller's point awards, newest first.
async fn list_point_awards(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = HistoryRepository::new((*state.db).clone());

    match repo.point_awards(user.user_id()).await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "point_awards": rows }))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing point awards");
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
