//! Query parameter types and id/flag parsing shared by the preset handlers.
//!
//! Parameters are taken as raw strings and parsed here so a missing or
//! malformed value becomes a JSON `400` instead of Axum's plain-text
//! extractor rejection.

use laserpanel_core::types::DbId;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// `?id=` on single-preset endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// `?all=` on the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListPresetsParams {
    pub all: Option<String>,
}

/// `?code=&thickness=` on the latest-by-material lookup.
#[derive(Debug, Deserialize)]
pub struct MaterialParams {
    pub code: Option<String>,
    pub thickness: Option<String>,
}

/// Parse a boolean flag: `true/false`, `1/0`, `yes/no`, case-insensitive.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Require an id from a query string value.
pub fn require_id(raw: Option<&str>) -> AppResult<DbId> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("id required".to_string()))?;
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("id must be an integer, got '{raw}'")))
}

/// Require an id from a JSON body field. Accepts integers and numeric strings.
pub fn require_json_id(value: Option<&Value>) -> AppResult<DbId> {
    match value {
        None | Some(Value::Null) => Err(AppError::BadRequest("id required".to_string())),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| AppError::BadRequest(format!("id must be an integer, got {n}"))),
        Some(Value::String(s)) => require_id(Some(s.as_str())),
        Some(other) => Err(AppError::BadRequest(format!(
            "id must be an integer, got {other}"
        ))),
    }
}
