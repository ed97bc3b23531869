//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router (same middleware stack as production)
//! through `tower::ServiceExt::oneshot`, with a per-test database provided
//! by `#[sqlx::test]`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use corkboard_api::auth::jwt::{generate_access_token, JwtConfig};
use corkboard_api::config::ServerConfig;
use corkboard_api::middleware::rate_limit::RateLimiter;
use corkboard_api::router::build_app_router;
use corkboard_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        rate_limit_window_secs: 60,
        // High enough that tests never trip the throttle.
        rate_limit_max_requests: 100_000,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let rate_limiter = Arc::new(RateLimiter::new(
        Duration::from_secs(config.rate_limit_window_secs),
        config.rate_limit_max_requests,
    ));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter,
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for `user_id` with the test secret.
pub fn token_for(user_id: Uuid) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation")
}

/// Insert a user row directly; user provisioning is out of API scope.
pub async fn seed_user(pool: &PgPool, email: &str, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seed user")
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    app.clone().oneshot(request).await.expect("response")
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn get_unauthenticated(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Parse a `data.*.id`-style string field into a Uuid.
pub fn uuid_field(value: &serde_json::Value) -> Uuid {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("uuid field")
}

/// Create a board through the API and return `(board_id, column_ids)` with
/// columns in position order.
pub async fn create_board(app: &Router, token: &str, title: &str) -> (Uuid, Vec<Uuid>) {
    let response = post_json(
        app,
        "/api/v1/boards",
        token,
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    let board_id = uuid_field(&json["data"]["board"]["id"]);
    let column_ids = json["data"]["columns"]
        .as_array()
        .expect("columns array")
        .iter()
        .map(|column| uuid_field(&column["id"]))
        .collect();
    (board_id, column_ids)
}

/// Create a card through the API and return its id.
pub async fn create_card(app: &Router, token: &str, column_id: Uuid, title: &str) -> Uuid {
    let response = post_json(
        app,
        &format!("/api/v1/columns/{column_id}/cards"),
        token,
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    uuid_field(&json["data"]["id"])
}

/// Add `user_id` to `board_id` with `role`, acting as `actor_token`.
pub async fn add_member(app: &Router, actor_token: &str, board_id: Uuid, user_id: Uuid, role: &str) {
    let response = post_json(
        app,
        &format!("/api/v1/boards/{board_id}/members"),
        actor_token,
        serde_json::json!({ "userId": user_id, "role": role }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}
