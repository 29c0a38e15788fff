//! Preset row models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use laserpanel_core::types::{DbId, Timestamp};

/// Soft-delete marker stored in `presets.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PresetStatus {
    Active,
    Deleted,
}

/// A full row from the `presets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: DbId,
    pub name: String,
    /// Materialized copy of `payload.material.name`.
    pub material_code: String,
    /// Materialized copy of `payload.material.thickness`.
    pub thickness: f64,
    pub payload: serde_json::Value,
    pub status: PresetStatus,
    pub updated_at: Timestamp,
}

/// A `presets` row without its payload, as returned by listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSummary {
    pub id: DbId,
    pub name: String,
    pub material_code: String,
    pub thickness: f64,
    pub status: PresetStatus,
    pub updated_at: Timestamp,
}
