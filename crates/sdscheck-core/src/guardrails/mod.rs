//! Warn-only format guardrails for extracted SDS documents.
//!
//! The guardrails cover exactly two field classes: CAS registry numbers
//! under `composition.ingredients[*].cas.value` and the MM-DD-YYYY date
//! fields under `document`. They never reject a document and never alter
//! tree shape; the only value they may rewrite is `cas.value`, and only
//! when normalization is enabled.
//!
//! Malformed input degrades to "no warning for that field". A node of
//! unexpected shape is skipped, never an error.

pub mod patterns;

pub use patterns::{normalize_cas, validate_cas, validate_us_date};

use serde_json::Value;
use tracing::debug;

use crate::document::{field_value, non_empty_str};
use crate::types::{Warning, WarningRule};

/// Document-level date fields validated by the guardrails.
const DATE_FIELDS: [&str; 2] = ["issue_date", "revision_date"];

/// Run the format guardrails over a document, collecting warnings.
///
/// When `normalize` is true, ingredient CAS values are rewritten in place
/// with their normalized form before validation. Warnings come back in
/// encounter order: ingredients in list order, then the date fields.
pub fn apply_guardrails(document: &mut Value, normalize: bool) -> Vec<Warning> {
    let mut warnings = Vec::new();
    check_ingredient_cas(document, normalize, &mut warnings);
    check_document_dates(document, &mut warnings);
    debug!(count = warnings.len(), "format guardrails finished");
    warnings
}

/// CAS checks over `composition.ingredients[*].cas.value`.
fn check_ingredient_cas(document: &mut Value, normalize: bool, warnings: &mut Vec<Warning>) {
    let Some(ingredients) = document
        .get_mut("composition")
        .and_then(|c| c.get_mut("ingredients"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    for (i, ingredient) in ingredients.iter_mut().enumerate() {
        let Some(cas) = ingredient.get_mut("cas").and_then(Value::as_object_mut) else {
            continue;
        };
        let raw = match cas.get("value").and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => s.to_owned(),
            _ => continue,
        };

        let normalized = normalize_cas(&raw);
        if normalize && normalized != raw {
            debug!(index = i, raw = %raw, normalized = %normalized, "rewrote ingredient CAS");
            cas.insert("value".to_string(), Value::String(normalized.clone()));
        }

        if !validate_cas(&normalized) {
            warnings.push(Warning::with_value(
                format!("composition.ingredients[{i}].cas.value"),
                WarningRule::CasFormat,
                "CAS number does not match expected pattern #######-##-#.",
                normalized,
            ));
        }
    }
}

/// Date checks over `document.issue_date.value` and
/// `document.revision_date.value`. Validation only, no normalization.
fn check_document_dates(document: &Value, warnings: &mut Vec<Warning>) {
    let Some(doc) = document.get("document") else {
        return;
    };

    for field in DATE_FIELDS {
        let Some(value) = doc.get(field).and_then(|node| field_value(node)) else {
            continue;
        };
        let Some(s) = non_empty_str(value) else {
            continue;
        };

        if !validate_us_date(s) {
            warnings.push(Warning::with_value(
                format!("document.{field}.value"),
                WarningRule::DateFormat,
                "Date is not a valid MM-DD-YYYY date.",
                s.to_owned(),
            ));
        }
    }
}
