use axum::routing::get;
use axum::Router;

use crate::handlers::controller;
use crate::state::AppState;

/// Controller proxy routes.
///
/// ```text
/// GET /loadresult   -> load_result
/// GET /listing      -> listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/loadresult", get(controller::load_result))
        .route("/listing", get(controller::listing))
}
