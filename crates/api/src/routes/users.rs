//! Cashier-facing user lookup routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::middleware::auth::{AuthUser, require_cashier};
use punktwerk_db::UserRepository;
use punktwerk_db::entities::users;
use punktwerk_shared::auth::UserInfo;

/// Queries shorter than this return an empty result instead of scanning.
const MIN_QUERY_LEN: usize = 2;

/// Creates the users router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/search", get(search))
        .route("/users/qr/{qr_code_id}", get(find_by_qr_code))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Email substring to match.
    #[serde(default)]
    pub q: String,
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        balance: user.balance,
        points: user.points,
        is_cashier: user.is_cashier,
        qr_code_id: user.qr_code_id,
    }
}

/// GET /users/search?q= - Search members by email (cashier only).
async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if let Err(response) = require_cashier(&user) {
        return response;
    }

    let query = params.q.trim();
    if query.len() < MIN_QUERY_LEN {
        return (StatusCode::OK, Json(json!({ "users": [] }))).into_response();
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.search(query).await {
        Ok(found) => {
            let users: Vec<UserInfo> = found.into_iter().map(user_info).collect();
            (StatusCode::OK, Json(json!({ "users": users }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error during user search");
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

/// GET /users/qr/{qr_code_id} - Resolve a scanned QR code (cashier only).
async fn find_by_qr_code(
    State(state): State<AppState>,
    user: AuthUser,
    Path(qr_code_id): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = require_cashier(&user) {
        return response;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.find_by_qr_code_id(&qr_code_id).await {
        Ok(Some(found)) => (StatusCode::OK, Json(user_info(found))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "user_not_found",
                "message": "No user matches this QR code"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error during QR lookup");
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
