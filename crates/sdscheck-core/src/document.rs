//! Document trees and tolerant access helpers.
//!
//! An extracted SDS document is a plain `serde_json::Value` tree. Any node
//! may be absent, null, or of the wrong type; every helper here is total
//! and returns `Option`/no-op instead of panicking, so traversal code can
//! treat malformed input as "nothing there".

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::types::Warning;

/// Errors that can occur when loading a document from disk.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported document extension: {0:?} (expected json, yaml or yml)")]
    UnsupportedExtension(String),
}

/// Parse a document tree from a JSON string.
pub fn from_json_str(json: &str) -> Result<Value, DocumentError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a document tree from a YAML string.
///
/// Hand-curated ground-truth documents are often authored as YAML; the
/// resulting tree is identical to what the JSON form would produce.
pub fn from_yaml_str(yaml: &str) -> Result<Value, DocumentError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a document tree from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let contents = fs::read_to_string(path)?;
    from_json_str(&contents)
}

/// Load a document tree from a YAML file.
pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let contents = fs::read_to_string(path)?;
    from_yaml_str(&contents)
}

/// Load a document tree, picking the parser from the file extension.
pub fn from_file(path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => from_json_file(path),
        "yaml" | "yml" => from_yaml_file(path),
        other => Err(DocumentError::UnsupportedExtension(other.to_string())),
    }
}

/// The `value` of a field-shaped node.
///
/// Returns `None` when the node is not a mapping or has no `value` key.
pub fn field_value(node: &Value) -> Option<&Value> {
    node.as_object()?.get("value")
}

/// A string with non-whitespace content, untouched otherwise.
pub fn non_empty_str(value: &Value) -> Option<&str> {
    let s = value.as_str()?;
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Append warnings to `meta.validation_warnings`, creating `meta` and the
/// warning list as needed.
///
/// Caller-side glue: the checks only produce warnings, the caller decides
/// where they land in the output document. A root that is not a mapping,
/// or a `meta` / `validation_warnings` of the wrong type, makes this a
/// no-op rather than an error.
pub fn attach_warnings(document: &mut Value, warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    let Some(root) = document.as_object_mut() else {
        return;
    };

    let meta = root
        .entry("meta")
        .or_insert_with(|| Value::Object(Default::default()));
    let Some(meta) = meta.as_object_mut() else {
        return;
    };

    let list = meta
        .entry("validation_warnings")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(list) = list.as_array_mut() else {
        return;
    };

    for warning in warnings {
        let serialized =
            serde_json::to_value(warning).expect("warning serializes to JSON");
        list.push(serialized);
    }
}
