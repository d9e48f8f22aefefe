//! Loose-input helpers for JSON payload fields.
//!
//! Callers send identifiers and quantities as strings, numbers, or booleans.
//! These helpers give every such value one textual and one integer reading.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip markup, control characters and redundant whitespace from free text.
///
/// Whitespace controls (tab, newline, ...) collapse into a single space like
/// any other whitespace; the remaining control characters are dropped.
pub fn sanitize_text(input: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(input, "");
    let printable: String = without_tags
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    WHITESPACE_REGEX
        .replace_all(&printable, " ")
        .trim()
        .to_string()
}

/// Trim only ASCII blanks (space, `\t`, `\n`, `\r`, NUL, `\x0B`).
///
/// Unicode spaces such as NBSP are kept, so they still fail digit checks.
pub fn trim_ascii_blanks(input: &str) -> &str {
    input.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Textual form of a scalar JSON value.
///
/// Returns `None` for `null`, arrays and objects. `true` reads as "1" and
/// `false` as "".
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether a payload field was supplied with something other than blank text.
///
/// Arrays and objects count as supplied so that they fail validation instead
/// of being treated as absent.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(scalar) => scalar_text(scalar)
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false),
    }
}

/// Absolute integer reading of a loose value.
///
/// Strings contribute their leading `[+-]digits` after leading whitespace
/// (anything else reads as 0), floats are truncated, and the result is
/// always non-negative. Overflow saturates.
pub fn absint(value: &Value) -> i64 {
    let signed = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.as_u64().is_some() {
                i64::MAX
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
                    .unwrap_or(0)
            }
        }
        Value::String(s) => leading_integer(s),
        Value::Bool(b) => i64::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    };

    signed.saturating_abs()
}

fn leading_integer(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut result: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        result = result.saturating_mul(10).saturating_add(i64::from(d));
    }

    if negative {
        -result
    } else {
        result
    }
}
