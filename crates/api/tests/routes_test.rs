//! Router-level tests that exercise the auth gates without a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;
use punktwerk_api::{AppState, create_router};
use punktwerk_shared::auth::{ROLE_CASHIER, ROLE_MEMBER};
use punktwerk_shared::{JwtConfig, JwtService};

fn test_state() -> AppState {
    AppState {
        db: Arc::new(DatabaseConnection::default()),
        jwt_service: Arc::new(JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            access_token_expires_minutes: 15,
            refresh_token_expires_days: 7,
        })),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

#[tokio::test]
async fn test_health_is_public() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_balance_change_requires_cashier() {
    let state = test_state();
    let token = state
        .jwt_service
        .generate_access_token(7, ROLE_MEMBER)
        .expect("Failed to generate token");
    let app = create_router(state);

    let payload = json!({
        "user_id": 7,
        "amount": 500,
        "kind": "deposit",
        "description": "Einzahlung"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/balance")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "cashier_required");
}

#[tokio::test]
async fn test_user_search_requires_cashier() {
    let state = test_state();
    let token = state
        .jwt_service
        .generate_access_token(7, ROLE_MEMBER)
        .expect("Failed to generate token");
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/search?q=anna")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_short_search_query_returns_empty_list() {
    let state = test_state();
    let token = state
        .jwt_service
        .generate_access_token(1, ROLE_CASHIER)
        .expect("Failed to generate token");
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/search?q=a")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn test_achievement_catalog_lists_all_badges() {
    let state = test_state();
    let token = state
        .jwt_service
        .generate_access_token(1, ROLE_MEMBER)
        .expect("Failed to generate token");
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/achievements/catalog")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let entries = body["achievements"].as_array().expect("Should be an array");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["key"], "first_deposit");
    assert_eq!(entries[0]["name"], "Erster Einzahler");
}
