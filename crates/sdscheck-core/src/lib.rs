//! # sdscheck-core
//!
//! Deterministic validation and accuracy scoring for SDS extraction output.
//!
//! Extraction of Safety Data Sheets is delegated to an external LLM
//! service and is inherently noisy. This crate is the post-extraction
//! core, answering:
//! - Are the CAS numbers and dates in this document plausibly formatted?
//! - How close is this document to a hand-verified reference?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **Warn-only**: Guardrails surface risk, they never reject a document
//! 3. **Panic-free on malformed trees**: unexpected shapes degrade to
//!    "nothing to check", never to a crash
//! 4. **Narrow write scope**: the only value a guardrail may rewrite is
//!    `composition.ingredients[*].cas.value`, and only when normalization
//!    is enabled
//!
//! ## Example
//!
//! ```rust,ignore
//! use sdscheck_core::{apply_guardrails, attach_warnings, evaluate};
//!
//! let mut extracted = sdscheck_core::document::from_json_file("extracted.json")?;
//! let warnings = apply_guardrails(&mut extracted, true);
//! attach_warnings(&mut extracted, &warnings);
//!
//! let truth = sdscheck_core::document::from_file("truth.yaml")?;
//! let report = evaluate(&extracted, &truth);
//! println!("accuracy: {:.2}%", report.accuracy);
//! ```

pub mod document;
pub mod eval;
pub mod guardrails;
pub mod schema;
pub mod types;

// Re-export main entry points at crate root
pub use document::{attach_warnings, field_value, non_empty_str, DocumentError};
pub use eval::evaluate;
pub use guardrails::{apply_guardrails, normalize_cas, validate_cas, validate_us_date};
pub use schema::{shape_warnings, validate_document_shape, SchemaError};
pub use types::{EvalReport, Warning, WarningRule};
