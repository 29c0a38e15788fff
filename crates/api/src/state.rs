use std::sync::Arc;

use laserpanel_controller::ControllerApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: laserpanel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// HTTP client for the machine controller.
    pub controller: Arc<ControllerApi>,
}
