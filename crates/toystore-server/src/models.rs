//! Wire types for the two managed collections, plus the coercion rules the
//! create/update paths apply to payload fields.
//!
//! `category_id` and `price` serialize as `null` when absent; `name` and
//! `description` are dropped from the JSON entirely, mirroring how the
//! upstream API distinguished an unparseable number from a never-set string.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A toy. Identified by its position in the toy sequence, not a stable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toy {
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// JSON number so seed prices keep their fractional part; created and
    /// updated prices are always re-coerced to integers.
    pub price: Option<Number>,
}

/// A category. `Toy::category_id` refers to a category's positional index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Truthiness of a payload value: `null`, `false`, `0` and `""` are falsy,
/// everything else is truthy. Note that form-encoded bodies arrive as
/// strings, so a form field `price=0` is the truthy string `"0"`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Best-effort integer coercion: numbers truncate toward zero, strings parse
/// an optional sign followed by leading decimal digits (`"12abc"` → 12),
/// anything else yields `None`. `None` is a marker for "not a number", not a
/// rejection, and serializes as `null`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: &str = match digits.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return None,
        Some(end) => &digits[..end],
        None => digits,
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}
