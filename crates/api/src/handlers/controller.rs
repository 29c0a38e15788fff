//! Read-only proxies to the machine controller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use laserpanel_controller::ControllerError;

use crate::error::AppResult;
use crate::response::LoadResultResponse;
use crate::state::AppState;

/// GET /loadresult -- result of the last program load on the controller.
pub async fn load_result(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let result = state.controller.load_result().await?;
    Ok(Json(LoadResultResponse { result }))
}

/// GET /listing -- G-code listing of the loaded program, as plain text.
///
/// Failures are plain text too, since the UI renders this body verbatim.
pub async fn listing(State(state): State<AppState>) -> Response {
    match state.controller.listing().await {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(err) => {
            let status = match err {
                ControllerError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            tracing::warn!(error = %err, %status, "Controller listing failed");
            (status, format!("Error: {err}")).into_response()
        }
    }
}
