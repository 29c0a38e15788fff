//! Response bodies returned by the preset and controller endpoints.
//!
//! The control-panel UI expects these exact shapes, so handlers build them
//! from the typed structs here rather than ad-hoc `json!` values.

use laserpanel_core::types::DbId;
use serde::Serialize;

/// `{ "status": "ok", "msg": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub status: &'static str,
    pub msg: String,
}

impl AckResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            status: "ok",
            msg: msg.into(),
        }
    }
}

/// Body of a successful `POST /savepreset`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: DbId,
    pub name: String,
}

/// Body of a successful `POST /copy_preset`.
#[derive(Debug, Serialize)]
pub struct CopiedResponse {
    pub id: DbId,
    pub msg: String,
}

/// Body of a successful `GET /loadresult`.
#[derive(Debug, Serialize)]
pub struct LoadResultResponse {
    pub result: String,
}
