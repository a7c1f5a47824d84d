//! Shared record types: validation warnings and evaluation reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies which check produced a warning.
///
/// Serialized as snake_case strings (`cas_format`, `date_format`,
/// `schema_shape`) so downstream consumers can match on stable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningRule {
    /// CAS number does not match the registry layout after normalization.
    CasFormat,
    /// Date field is not a valid MM-DD-YYYY calendar date.
    DateFormat,
    /// Document deviates from the SDS extraction schema shape.
    SchemaShape,
}

/// A warn-only validation finding.
///
/// Warnings are additive diagnostics: they are accumulated by the checks,
/// attached to `meta.validation_warnings` by the caller, and never prevent
/// a document from being produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Path of the offending field, e.g. `composition.ingredients[2].cas.value`.
    pub field: String,

    /// Which check fired.
    pub rule: WarningRule,

    /// Human-readable description.
    pub message: String,

    /// The offending value, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Warning {
    /// Create a warning without an attached value.
    pub fn new(field: impl Into<String>, rule: WarningRule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
            value: None,
        }
    }

    /// Create a warning carrying the offending value.
    pub fn with_value(
        field: impl Into<String>,
        rule: WarningRule,
        message: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
            value: Some(value.into()),
        }
    }
}

/// Accuracy report for one (extracted, truth) document pair.
///
/// The truth document defines what is graded: every leaf it contains is a
/// comparison point. `accuracy` is a percentage in 0.0..=100.0, rounded to
/// two decimals; an empty truth document is trivially fully accurate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Number of leaf comparison points in the truth document.
    pub fields_compared: usize,

    /// How many of them matched after comparison normalization.
    pub correct: usize,

    /// Paths of truth leaves the extracted document missed or got wrong.
    pub missing: Vec<String>,

    /// Extracted values with no counterpart in truth. Currently never
    /// populated; kept for report-shape compatibility.
    pub hallucinated: Vec<String>,

    /// `correct / fields_compared * 100`, rounded to two decimals.
    pub accuracy: f64,
}
