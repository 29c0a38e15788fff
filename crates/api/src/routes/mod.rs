pub mod controller;
pub mod health;
pub mod presets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /listpresets                 list summaries (?all=bool)
/// /savepreset                  create
/// /updatepreset                replace document
/// /deletepreset                soft delete (?id=)
/// /copy_preset                 duplicate
/// /delete_all_presets          purge everything
/// /get_preset                  full record by id (?id=)
/// /getpreset                   latest payload for a material (?code=&thickness=)
///
/// /loadresult                  controller load result
/// /listing                     controller G-code listing (text/plain)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(presets::router())
        .merge(controller::router())
}
