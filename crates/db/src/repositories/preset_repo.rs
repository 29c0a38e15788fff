//! Repository for the `presets` table.
//!
//! Every method is a single SQL statement, so SQLite's statement atomicity
//! is the only concurrency control: concurrent writes to the same row are
//! last-committed-wins, and a failed write leaves nothing behind.

use chrono::Utc;
use sqlx::SqlitePool;
use laserpanel_core::preset::PresetDraft;
use laserpanel_core::types::DbId;

use crate::models::preset::{Preset, PresetSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, material_code, thickness, payload, status, updated_at";

/// Listing columns: everything except the payload.
const SUMMARY_COLUMNS: &str = "id, name, material_code, thickness, status, updated_at";

/// Provides CRUD, soft-delete and duplication for presets.
pub struct PresetRepo;

impl PresetRepo {
    /// Insert a new active preset, returning the created row.
    pub async fn create(pool: &SqlitePool, draft: &PresetDraft) -> Result<Preset, sqlx::Error> {
        let query = format!(
            "INSERT INTO presets (name, material_code, thickness, payload, status, updated_at) \
             VALUES (?, ?, ?, ?, 'active', ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preset>(&query)
            .bind(&draft.name)
            .bind(&draft.material_code)
            .bind(draft.thickness)
            .bind(&draft.payload)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a preset by ID regardless of its status.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Preset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presets WHERE id = ?");
        sqlx::query_as::<_, Preset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active preset by ID. Soft-deleted rows are treated as absent.
    pub async fn find_active_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Preset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presets WHERE id = ? AND status = 'active'");
        sqlx::query_as::<_, Preset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recently updated active preset for a material code and thickness.
    pub async fn find_latest_by_material(
        pool: &SqlitePool,
        material_code: &str,
        thickness: f64,
    ) -> Result<Option<Preset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM presets \
             WHERE material_code = ? AND thickness = ? AND status = 'active' \
             ORDER BY updated_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Preset>(&query)
            .bind(material_code)
            .bind(thickness)
            .fetch_optional(pool)
            .await
    }

    /// List presets, most recently updated first.
    ///
    /// Soft-deleted rows are only included when `include_deleted` is set.
    /// Ties on `updated_at` keep insertion order.
    pub async fn list(
        pool: &SqlitePool,
        include_deleted: bool,
    ) -> Result<Vec<PresetSummary>, sqlx::Error> {
        let filter = if include_deleted {
            ""
        } else {
            "WHERE status = 'active' "
        };
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM presets {filter}ORDER BY updated_at DESC, id ASC"
        );
        sqlx::query_as::<_, PresetSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite an active preset's name, materialized fields and payload.
    ///
    /// Returns `None` if no active row with the given `id` exists, which
    /// covers both unknown and soft-deleted ids.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        draft: &PresetDraft,
    ) -> Result<Option<Preset>, sqlx::Error> {
        let query = format!(
            "UPDATE presets SET \
                name = ?, \
                material_code = ?, \
                thickness = ?, \
                payload = ?, \
                updated_at = ? \
             WHERE id = ? AND status = 'active' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preset>(&query)
            .bind(&draft.name)
            .bind(&draft.material_code)
            .bind(draft.thickness)
            .bind(&draft.payload)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a preset. Returns `true` if an active row was marked deleted.
    pub async fn soft_delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE presets SET status = 'deleted', updated_at = ? \
             WHERE id = ? AND status = 'active'",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Copy an active preset into a new row with a fresh id.
    ///
    /// Name, materialized fields and payload are copied as-is; no suffix is
    /// added, so the copy shares its source's name. Returns `None` if the
    /// source is missing or soft-deleted.
    pub async fn duplicate(pool: &SqlitePool, id: DbId) -> Result<Option<Preset>, sqlx::Error> {
        let query = format!(
            "INSERT INTO presets (name, material_code, thickness, payload, status, updated_at) \
             SELECT name, material_code, thickness, payload, 'active', ? \
             FROM presets WHERE id = ? AND status = 'active' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preset>(&query)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete every preset regardless of status.
    ///
    /// Returns the number of rows removed. Ids stay burned: `AUTOINCREMENT`
    /// keeps its high-water mark.
    pub async fn purge_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM presets").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
