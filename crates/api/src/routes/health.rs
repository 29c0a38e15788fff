use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use laserpanel_db::migrations::applied_versions;

use crate::state::AppState;

/// `GET /health` body.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the preset database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Highest migration recorded in `schema_migrations`, if readable.
    pub schema_version: Option<i64>,
    /// Controller base URL the proxy routes forward to.
    pub controller_url: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let schema_version = match applied_versions(&state.pool).await {
        Ok(versions) => versions.last().copied(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read schema_migrations");
            None
        }
    };
    let db_healthy = schema_version.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version,
        controller_url: state.controller.base_url().to_string(),
    })
}

/// Root-level health route (not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
