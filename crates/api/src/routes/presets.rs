//! Route definitions for the preset store.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::presets;
use crate::state::AppState;

/// Preset routes, mounted at the API root.
///
/// ```text
/// GET    /listpresets          -> list_presets        (?all=bool)
/// POST   /savepreset           -> save_preset
/// PUT    /updatepreset         -> update_preset
/// DELETE /deletepreset         -> delete_preset       (?id=)
/// POST   /copy_preset          -> copy_preset
/// DELETE /delete_all_presets   -> delete_all_presets
/// GET    /get_preset           -> get_preset          (?id=)
/// GET    /getpreset            -> get_latest_preset   (?code=&thickness=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listpresets", get(presets::list_presets))
        .route("/savepreset", post(presets::save_preset))
        .route("/updatepreset", put(presets::update_preset))
        .route("/deletepreset", delete(presets::delete_preset))
        .route("/copy_preset", post(presets::copy_preset))
        .route("/delete_all_presets", delete(presets::delete_all_presets))
        .route("/get_preset", get(presets::get_preset))
        .route("/getpreset", get(presets::get_latest_preset))
}
