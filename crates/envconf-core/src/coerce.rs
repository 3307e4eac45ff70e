//! Permissive string coercion
//!
//! Environment variables are always strings, so typed accessors accept
//! shell-friendly spellings: `yes`/`on`/`enabled` for booleans and numeric
//! prefixes (`"42abc"` reads as 42) for numbers. Every function returns
//! `None` instead of an error; callers substitute their default.

use crate::value::Value;

/// Map a string onto a boolean, case-insensitively
pub fn parse_boolean(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disabled" => Some(false),
        _ => None,
    }
}

/// Parse the integer at the start of a string, ignoring what follows
///
/// Accepts an optional sign and at least one digit. Values outside the
/// `i64` range do not parse.
pub fn parse_integer_prefix(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    let sign = sign_len(bytes);
    let digits = digit_run(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parse the float at the start of a string, ignoring what follows
///
/// Requires digits on both sides of a decimal point, optionally followed by
/// an exponent. Strings like `"5"`, `"5."` and `"1e3"` do not parse.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = sign_len(bytes);

    let whole = digit_run(&bytes[end..]);
    if whole == 0 {
        return None;
    }
    end += whole;

    if bytes.get(end) != Some(&b'.') {
        return None;
    }
    let fraction = digit_run(&bytes[end + 1..]);
    if fraction == 0 {
        return None;
    }
    end += 1 + fraction;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digit_run(&bytes[end + 1 + exp_sign..]);
        // an incomplete exponent is left with the trailing text
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok().filter(|f: &f64| f.is_finite())
}

/// Coerce a resolved value to a boolean
pub fn to_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_boolean(s),
        _ => None,
    }
}

/// Coerce a resolved value to an integer
pub fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::String(s) => parse_integer_prefix(s),
        _ => None,
    }
}

/// Coerce a resolved value to a float
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
