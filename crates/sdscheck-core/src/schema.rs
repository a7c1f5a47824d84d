//! JSON Schema check for the SDS document shape.
//!
//! The extraction prompt pins an exact document shape; this module embeds
//! that shape as a JSON Schema (spec/sds-document.schema.json) and reports
//! deviations as warnings. The schema is deliberately permissive: sections
//! and keys are optional and unknown keys are allowed, so partial
//! extractions and newer schema revisions pass. Like the guardrails, the
//! check is warn-only and never rejects a document.

use std::sync::OnceLock;

use serde_json::Value;
use thiserror::Error;

use crate::types::{Warning, WarningRule};

/// Embedded document schema (loaded at compile time).
const SDS_SCHEMA_JSON: &str = include_str!("../../../spec/sds-document.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema loading.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

/// Get or initialize the compiled schema validator.
fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(SDS_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(SchemaError::LoadError(e.clone())),
    }
}

/// Validate a document against the SDS shape schema.
///
/// Returns `Ok(())` if the shape conforms, or the list of violation
/// messages otherwise.
pub fn validate_document_shape(document: &Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Warn-only wrapper: each shape violation becomes a `schema_shape`
/// warning whose field uses the same dot/bracket addressing as the
/// guardrail and evaluation paths.
pub fn shape_warnings(document: &Value) -> Vec<Warning> {
    let Ok(validator) = get_validator() else {
        return Vec::new();
    };

    validator
        .iter_errors(document)
        .map(|e| {
            Warning::new(
                pointer_to_path(&e.instance_path.to_string()),
                WarningRule::SchemaShape,
                e.to_string(),
            )
        })
        .collect()
}

/// Convert a JSON pointer (`/composition/ingredients/0/cas`) into the
/// dot/bracket path addressing used everywhere else
/// (`composition.ingredients[0].cas`).
fn pointer_to_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').filter(|s| !s.is_empty()) {
        if segment.chars().all(|c| c.is_ascii_digit()) {
            path.push('[');
            path.push_str(segment);
            path.push(']');
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(segment);
        }
    }
    path
}
