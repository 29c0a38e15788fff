#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use laserpanel_api::config::{LogFormat, ServerConfig};
use laserpanel_api::router::build_app_router;
use laserpanel_api::state::AppState;
use laserpanel_controller::ControllerApi;

/// Build a test `ServerConfig` with safe defaults.
///
/// The controller points at the discard port on loopback, so controller
/// routes fail fast with a connection error unless a test overrides it.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        controller_url: "http://127.0.0.1:9".to_string(),
        controller_timeout_secs: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over a migrated `pool`, using the
/// default test config.
pub async fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, test_config()).await
}

/// Build the full application router with a custom config.
///
/// Uses [`build_app_router`] so tests exercise the same middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) as production.
pub async fn build_test_app_with(pool: SqlitePool, config: ServerConfig) -> Router {
    laserpanel_db::run_migrations(&pool).await.unwrap();

    let controller = ControllerApi::new(
        config.controller_url.clone(),
        Duration::from_secs(config.controller_timeout_secs),
    )
    .unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        controller: Arc::new(controller),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Body::from(json.to_string())).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Create a preset through the API and return its id.
pub async fn create_preset(app: Router, doc: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/savepreset", doc).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
