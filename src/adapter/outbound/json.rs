//! Lenient readers for loosely typed provider payloads.
//!
//! Upstreams mix numbers and numeric strings for the same field, so every
//! numeric read goes through [`number`].

use serde_json::Value;

/// Read a number, accepting numeric strings. Non-finite values are absent.
#[must_use]
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Follow `path` through nested objects.
#[must_use]
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

/// Number at `path`.
#[must_use]
pub fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    at(value, path).and_then(number)
}

/// Array at `path`, empty when missing or not an array.
#[must_use]
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    at(value, path)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Non-negative integer at `path`, accepting numeric strings.
#[must_use]
pub fn u32_at(value: &Value, path: &[&str]) -> Option<u32> {
    let n = number_at(value, path)?;
    (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}
