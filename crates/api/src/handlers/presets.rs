//! Handlers for the cut-preset store.
//!
//! Request bodies are parsed as JSON regardless of `Content-Type`: the
//! control-panel UI posts presets without always setting it.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use laserpanel_core::error::CoreError;
use laserpanel_core::preset::parse_preset_document;
use laserpanel_core::types::DbId;
use laserpanel_db::models::preset::Preset;
use laserpanel_db::repositories::PresetRepo;
use laserpanel_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::query::{
    parse_flag, require_id, require_json_id, IdParams, ListPresetsParams, MaterialParams,
};
use crate::response::{AckResponse, CopiedResponse, CreatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn preset_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Preset",
        id,
    })
}

/// Verify that an active preset exists, returning the full row.
///
/// Unknown and soft-deleted ids produce the same 404.
async fn ensure_active_preset(pool: &DbPool, id: DbId) -> AppResult<Preset> {
    PresetRepo::find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| preset_not_found(id))
}

fn parse_json_body(body: &[u8]) -> AppResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Request body must be valid JSON: {e}")))
}

// ---------------------------------------------------------------------------
// GET /listpresets
// ---------------------------------------------------------------------------

/// List preset summaries, most recently updated first.
///
/// Soft-deleted presets are included only with `?all=true`.
pub async fn list_presets(
    State(state): State<AppState>,
    Query(params): Query<ListPresetsParams>,
) -> AppResult<impl IntoResponse> {
    let include_deleted = match params.all.as_deref() {
        None => false,
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            AppError::BadRequest(format!("all must be a boolean, got '{raw}'"))
        })?,
    };

    let items = PresetRepo::list(&state.pool, include_deleted).await?;
    tracing::debug!(count = items.len(), include_deleted, "Listed presets");
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// POST /savepreset
// ---------------------------------------------------------------------------

/// Create a new preset from a submitted document.
pub async fn save_preset(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let draft = parse_preset_document(parse_json_body(&body)?)?;

    let created = PresetRepo::create(&state.pool, &draft).await?;
    tracing::info!(id = created.id, name = %created.name, "Preset created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id: created.id,
            name: created.name,
        }),
    ))
}

// ---------------------------------------------------------------------------
// PUT /updatepreset
// ---------------------------------------------------------------------------

/// Replace an active preset's document.
///
/// The body is the new document plus its `id`; the `id` key is addressing
/// only and is not stored in the payload.
pub async fn update_preset(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let mut document = parse_json_body(&body)?;
    let id = require_json_id(document.get("id"))?;

    ensure_active_preset(&state.pool, id).await?;

    if let Value::Object(map) = &mut document {
        map.remove("id");
    }
    let draft = parse_preset_document(document)?;

    let updated = PresetRepo::update(&state.pool, id, &draft)
        .await?
        .ok_or_else(|| preset_not_found(id))?;
    tracing::info!(id = updated.id, name = %updated.name, "Preset updated");
    Ok(Json(AckResponse::ok(format!("Preset {id} updated"))))
}

// ---------------------------------------------------------------------------
// DELETE /deletepreset
// ---------------------------------------------------------------------------

/// Soft-delete a preset. A second delete of the same id is a 404.
pub async fn delete_preset(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let id = require_id(params.id.as_deref())?;

    if PresetRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(id, "Preset soft-deleted");
        Ok(Json(AckResponse::ok(format!("Preset {id} deleted"))))
    } else {
        Err(preset_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// POST /copy_preset
// ---------------------------------------------------------------------------

/// Duplicate an active preset into a new id with the same name and payload.
pub async fn copy_preset(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request = parse_json_body(&body)?;
    let id = require_json_id(request.get("id"))?;

    let copy = PresetRepo::duplicate(&state.pool, id)
        .await?
        .ok_or_else(|| preset_not_found(id))?;
    tracing::info!(source_id = id, id = copy.id, "Preset duplicated");
    Ok((
        StatusCode::CREATED,
        Json(CopiedResponse {
            id: copy.id,
            msg: format!("Preset {id} copied to {}", copy.id),
        }),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /delete_all_presets
// ---------------------------------------------------------------------------

/// Permanently remove every preset, active or deleted.
pub async fn delete_all_presets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let removed = PresetRepo::purge_all(&state.pool).await?;
    tracing::warn!(removed, "All presets purged");
    Ok(Json(AckResponse::ok(format!("Deleted {removed} presets"))))
}

// ---------------------------------------------------------------------------
// GET /get_preset
// ---------------------------------------------------------------------------

/// Get a full preset by id, including soft-deleted ones.
pub async fn get_preset(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let id = require_id(params.id.as_deref())?;
    let preset = PresetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| preset_not_found(id))?;
    Ok(Json(preset))
}

// ---------------------------------------------------------------------------
// GET /getpreset
// ---------------------------------------------------------------------------

/// Return the stored document of the latest active preset for a material.
pub async fn get_latest_preset(
    State(state): State<AppState>,
    Query(params): Query<MaterialParams>,
) -> AppResult<impl IntoResponse> {
    let (Some(code), Some(raw_thickness)) = (
        params.code.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        params.thickness.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "code and thickness required".to_string(),
        ));
    };
    let thickness: f64 = raw_thickness.parse().map_err(|_| {
        AppError::BadRequest(format!("thickness must be a number, got '{raw_thickness}'"))
    })?;

    let preset = PresetRepo::find_latest_by_material(&state.pool, code, thickness)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No preset for material {code} at thickness {thickness}"))
        })?;
    Ok(Json(preset.payload))
}
