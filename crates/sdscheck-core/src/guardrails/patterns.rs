//! Format patterns and normalizers shared by the guardrail checks.
//!
//! Normalization and validation are split on purpose: `normalize_cas` only
//! cleans up cosmetics and performs no validation, `validate_*` only test
//! and never modify.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// CAS registry layout: 2-7 digits, dash, 2 digits, dash, 1 check digit.
    /// Format only; the checksum is not verified.
    pub static ref CAS_PATTERN: Regex = Regex::new(r"^\d{2,7}-\d{2}-\d$").unwrap();

    /// Date layout required by the extraction prompt: MM-DD-YYYY.
    pub static ref US_DATE_PATTERN: Regex = Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap();

    /// A hyphen with optional whitespace around it, e.g. "7732 - 18".
    static ref SPACED_HYPHEN: Regex = Regex::new(r"\s*-\s*").unwrap();
}

/// Unicode dash variants that show up in PDF-extracted text: hyphen,
/// non-breaking hyphen, figure dash, en dash, em dash, minus sign.
const DASH_VARIANTS: [char; 6] = [
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}',
];

/// Normalize dash characters and spacing in a CAS value.
///
/// Trims surrounding whitespace, maps the Unicode dash variants to the
/// ASCII hyphen and collapses whitespace hugging a hyphen. Idempotent.
pub fn normalize_cas(raw: &str) -> String {
    let mapped: String = raw
        .trim()
        .chars()
        .map(|c| if DASH_VARIANTS.contains(&c) { '-' } else { c })
        .collect();
    SPACED_HYPHEN.replace_all(&mapped, "-").into_owned()
}

/// Whether a value matches the CAS registry layout.
pub fn validate_cas(value: &str) -> bool {
    CAS_PATTERN.is_match(value)
}

/// Whether a value is a real MM-DD-YYYY calendar date.
///
/// Layout and calendar validity are both required: `02-30-2024` fails,
/// `02-29-2024` passes only because 2024 is a leap year. A parse failure
/// means "invalid", it is never propagated.
pub fn validate_us_date(value: &str) -> bool {
    let s = value.trim();
    if !US_DATE_PATTERN.is_match(s) {
        return false;
    }
    NaiveDate::parse_from_str(s, "%m-%d-%Y").is_ok()
}
