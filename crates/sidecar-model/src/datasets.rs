//! Bundled datasets
//!
//! The sample is what the dashboard shows before anything is imported.
//! The full dataset ships with one blocked item that has no `progress`,
//! so importing it is rejected with a single error.

use crate::error::ModelError;
use crate::types::Payload;
use serde_json::{json, Value};

/// Two-project sample payload
pub const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// Larger dataset with deliverables and a master roadmap
pub const FULL_JSON: &str = include_str!("../data/full.json");

/// Typed sample payload
///
/// # Errors
/// Only fails if the bundled document is corrupt.
pub fn sample_payload() -> Result<Payload, ModelError> {
    Payload::from_json_str(SAMPLE_JSON)
}

/// Decoded sample, as shipped
///
/// # Errors
/// Only fails if the bundled document is corrupt.
pub fn sample_payload_json() -> Result<Value, ModelError> {
    serde_json::from_str(SAMPLE_JSON).map_err(ModelError::Shape)
}

/// Decoded full dataset, untyped so it can go through validation first
///
/// # Errors
/// Only fails if the bundled document is corrupt.
pub fn full_payload_json() -> Result<Value, ModelError> {
    serde_json::from_str(FULL_JSON).map_err(ModelError::Shape)
}

/// Payload that fails validation on both the version tag and `projects`
#[must_use]
pub fn invalid_payload() -> Value {
    json!({ "contract_version": "wrong_contract", "projects": [] })
}
