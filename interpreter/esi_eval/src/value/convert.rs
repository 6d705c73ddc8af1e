//! ES5 abstract conversions.
//!
//! Only the behaviors the operator tables need: ToNumber, ToString (via
//! `Value`'s `Display`), ToInt32/ToUint32 for the bitwise operators, and
//! number formatting. Full spec-accurate ToPrimitive corner cases are an
//! explicit non-goal.

use crate::value::Value;

/// ES5 ToNumber.
///
/// Strings trim whitespace and accept the usual decimal forms plus
/// `Infinity`; anything else is NaN. Objects and functions are NaN;
/// arrays convert through their string form (`[5]` is `5`, `[]` is `0`),
/// matching observable source-language behavior for the common cases.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::Str(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&value.to_string()),
        Value::Object(_) | Value::Function(_) | Value::Native(_) => f64::NAN,
    }
}

fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // f64::from_str accepts "inf"/"infinity" case-insensitively, which
    // covers the source language's "Infinity"; it also accepts forms
    // like "1e3" and "-2.5" that both languages share.
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// ES5 ToString for numbers.
///
/// Integral doubles print without a fractional part; NaN and the
/// infinities use the source-language spellings.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Negative zero prints as "0".
        return "0".to_string();
    }
    if n.trunc() == n && n.abs() < 1e21 {
        // {:.0} keeps magnitudes beyond the i64 range exact.
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

/// ES5 ToUint32: truncate and wrap into `[0, 2^32)`.
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    const TWO_32: f64 = 4_294_967_296.0;
    let m = n.trunc() % TWO_32;
    let m = if m < 0.0 { m + TWO_32 } else { m };
    m as u32
}

/// ES5 ToInt32: `to_uint32` reinterpreted as signed.
pub fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

/// Property-key conversion: the string form of any value.
pub fn to_property_key(value: &Value) -> String {
    value.to_string()
}

/// Parse a property key as a canonical array index.
///
/// Only plain non-negative decimal forms count; `"01"` or `"-1"` are
/// ordinary (unsupported) property names.
pub fn array_index(key: &str) -> Option<usize> {
    if key == "0" {
        return Some(0);
    }
    if key.is_empty() || key.starts_with('0') || key.starts_with('+') || key.starts_with('-') {
        return None;
    }
    key.parse::<usize>().ok()
}
