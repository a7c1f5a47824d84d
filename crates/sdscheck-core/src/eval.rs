//! Field-by-field accuracy scoring against a ground-truth document.
//!
//! The truth document drives the comparison: every leaf it contains is a
//! comparison point, and only keys present in truth are graded. Extra
//! fields in the extracted document are never penalized. This makes the
//! engine schema-agnostic: renamed or newly added fields are graded as
//! soon as a truth document carries them.

use serde_json::Value;
use tracing::debug;

use crate::types::EvalReport;

/// Running counters threaded through the recursive walk.
#[derive(Default)]
struct Tally {
    fields_compared: usize,
    correct: usize,
    missing: Vec<String>,
}

/// Score an extracted document against a trusted reference.
///
/// Both trees are read-only. Structural mismatches (truth expects a
/// mapping, extracted holds a scalar; truth sequence longer than the
/// extracted one) degrade to a null on the extracted side and count as
/// mismatches wherever truth's leaf is non-null.
pub fn evaluate(extracted: &Value, truth: &Value) -> EvalReport {
    let mut tally = Tally::default();
    walk(truth, Some(extracted), "", &mut tally);

    let accuracy = if tally.fields_compared > 0 {
        round2(tally.correct as f64 / tally.fields_compared as f64 * 100.0)
    } else {
        // An empty reference is trivially fully accurate.
        100.0
    };

    debug!(
        fields_compared = tally.fields_compared,
        correct = tally.correct,
        accuracy,
        "evaluation finished"
    );

    EvalReport {
        fields_compared: tally.fields_compared,
        correct: tally.correct,
        missing: tally.missing,
        hallucinated: Vec::new(),
        accuracy,
    }
}

/// Recursive co-traversal of (truth, extracted).
fn walk(truth: &Value, extracted: Option<&Value>, path: &str, tally: &mut Tally) {
    match truth {
        Value::Object(map) => {
            for (key, truth_child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let extracted_child = extracted.and_then(|e| e.get(key));
                walk(truth_child, extracted_child, &child_path, tally);
            }
        }
        Value::Array(items) => {
            for (i, truth_item) in items.iter().enumerate() {
                let child_path = format!("{path}[{i}]");
                let extracted_item = extracted.and_then(|e| e.get(i));
                walk(truth_item, extracted_item, &child_path, tally);
            }
        }
        leaf => {
            tally.fields_compared += 1;
            if leaf_matches(leaf, extracted.unwrap_or(&Value::Null)) {
                tally.correct += 1;
            } else {
                tally.missing.push(path.to_string());
            }
        }
    }
}

/// Leaf equality after comparison normalization: strings compare trimmed
/// and lowercased, everything else as-is.
fn leaf_matches(truth: &Value, extracted: &Value) -> bool {
    match (truth, extracted) {
        (Value::String(t), Value::String(e)) => {
            t.trim().to_lowercase() == e.trim().to_lowercase()
        }
        _ => truth == extracted,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
