//! Achievement routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use punktwerk_core::achievements::CATALOG;
use punktwerk_db::HistoryRepository;

/// Creates the achievements router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list_achievements))
        .route("/achievements/catalog", get(catalog))
}

/// GET /achievements - The caller's unlocks, newest first.
async fn list_achievements(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = HistoryRepository::new((*state.db).clone());

    match repo.achievements(user.user_id()).await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "achievements": rows }))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing achievements");
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

/// A catalog entry describing an earnable badge.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    /// Stable rule key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display description.
    pub description: &'static str,
}

/// GET /achievements/catalog - Every badge the system can award.
async fn catalog() -> impl IntoResponse {
    let entries: Vec<CatalogEntry> = CATALOG
        .iter()
        .map(|rule| CatalogEntry {
            key: rule.key,
            name: rule.name,
            description: rule.description,
        })
        .collect();

    (StatusCode::OK, Json(json!({ "achievements": entries }))).into_response()
}
