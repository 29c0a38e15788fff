//! Preset document validation and name derivation.
//!
//! A preset is stored as an opaque JSON document, but two nested fields are
//! load-bearing: `material.name` and `material.thickness`. They are copied
//! into their own columns on every write, so this module is the single place
//! that reads them out of the document and decides what gets written.

use serde::Deserialize;
use serde_json::{Number, Value};
use validator::{Validate, ValidationError};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length for an explicit preset name.
pub const MAX_PRESET_NAME_LEN: usize = 200;

/// Maximum length for a material name (the materialized material code).
pub const MAX_MATERIAL_NAME_LEN: usize = 200;

// `validator` length bounds must be `u64` paths.
const MAX_PRESET_NAME_LEN_U64: u64 = MAX_PRESET_NAME_LEN as u64;
const MAX_MATERIAL_NAME_LEN_U64: u64 = MAX_MATERIAL_NAME_LEN as u64;

/* --------------------------------------------------------------------------
   Typed document view
   -------------------------------------------------------------------------- */

/// The fields of a submitted preset document the store depends on.
///
/// Every other key in the document is carried through untouched in the
/// payload and never inspected.
#[derive(Debug, Deserialize, Validate)]
pub struct PresetDocument {
    #[serde(default)]
    #[validate(length(max = MAX_PRESET_NAME_LEN_U64, message = "name must be at most 200 characters"))]
    pub name: Option<String>,
    #[validate(nested)]
    pub material: Material,
}

/// The `material` object inside a preset document.
#[derive(Debug, Deserialize, Validate)]
pub struct Material {
    #[validate(
        length(
            max = MAX_MATERIAL_NAME_LEN_U64,
            message = "material.name must be at most 200 characters"
        ),
        custom(function = "not_blank")
    )]
    pub name: String,
    /// Kept as a JSON number so the derived name uses serde_json's canonical
    /// rendering: integers stay integral (`3`, not `3.0`) and floats print
    /// in shortest form (`2.50` becomes `2.5`).
    pub thickness: Number,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("material.name must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// A validated write: the resolved name, the materialized fields, and the
/// payload they were read from.
///
/// Only [`parse_preset_document`] builds one, which keeps `material_code`
/// and `thickness` in lockstep with `payload.material`.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDraft {
    pub name: String,
    pub material_code: String,
    pub thickness: f64,
    pub payload: Value,
}

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Name used when the caller does not supply one: `"{material}_{thickness}"`.
pub fn default_preset_name(material_name: &str, thickness: &Number) -> String {
    format!("{material_name}_{thickness}")
}

/// Validate a submitted preset document and derive everything the store writes.
///
/// Requires `material.name` (non-blank string) and `material.thickness`
/// (JSON number). A missing, null or blank `name` falls back to
/// [`default_preset_name`].
pub fn parse_preset_document(payload: Value) -> Result<PresetDraft, CoreError> {
    if !payload.is_object() {
        return Err(CoreError::Validation(
            "Preset document must be a JSON object".to_string(),
        ));
    }

    let doc = PresetDocument::deserialize(&payload)
        .map_err(|e| CoreError::Validation(format!("Invalid preset document: {e}")))?;
    doc.validate()
        .map_err(|e| CoreError::Validation(format!("Invalid preset document: {e}")))?;

    let thickness = doc.material.thickness.as_f64().ok_or_else(|| {
        CoreError::Validation(format!(
            "material.thickness is not representable: {}",
            doc.material.thickness
        ))
    })?;

    let name = match doc.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => default_preset_name(&doc.material.name, &doc.material.thickness),
    };

    Ok(PresetDraft {
        name,
        material_code: doc.material.name,
        thickness,
        payload,
    })
}
