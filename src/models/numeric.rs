//! Numeric normalization at the input boundary.
//!
//! Metrics arrive as numbers, numeric strings, booleans or not at all.
//! Everything is funnelled through [`to_number`] so that dirty input
//! degrades to zero instead of failing a whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convert an arbitrary JSON value to a finite `f64`.
///
/// Numbers pass through, strings are parsed after trimming, booleans map
/// to 1/0. Anything else, and any non-finite result, becomes `0.0`.
pub fn to_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    finite_or_zero(n)
}

/// Parse a string metric, e.g. `"2.75"` or `" 3 "`. Unparsable input is `0.0`.
pub fn parse_number(s: &str) -> f64 {
    finite_or_zero(s.trim().parse::<f64>().unwrap_or(0.0))
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Convert a JSON value to a non-negative counter.
pub fn to_count(value: &Value) -> u32 {
    let n = to_number(value);
    if n <= 0.0 {
        0
    } else if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n.trunc() as u32
    }
}

/// Convert a JSON value to a flag. `"true"`, `"1"`, `"yes"` and non-zero numbers count as set.
pub fn to_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) => to_number(value) != 0.0,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}

/// `deserialize_with` helpers. Pair with `#[serde(default)]` so a missing
/// field also lands on zero.
pub mod lenient {
    use super::*;

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        Ok(to_count(&Value::deserialize(deserializer)?))
    }

    pub fn ratio<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(to_number(&Value::deserialize(deserializer)?))
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(to_flag(&Value::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_numbers_and_strings() {
        assert_eq!(to_number(&json!(2.5)), 2.5);
        assert_eq!(to_number(&json!(3)), 3.0);
        assert_eq!(to_number(&json!("1.75")), 1.75);
        assert_eq!(to_number(&json!("  4 ")), 4.0);
    }

    #[test]
    fn test_to_number_invalid_is_zero() {
        assert_eq!(to_number(&json!("N/A")), 0.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&Value::Null), 0.0);
        assert_eq!(to_number(&json!([1, 2])), 0.0);
        assert_eq!(to_number(&json!({"kda": 1})), 0.0);
    }

    #[test]
    fn test_to_number_non_finite_is_zero() {
        assert_eq!(to_number(&json!("NaN")), 0.0);
        assert_eq!(to_number(&json!("inf")), 0.0);
        assert_eq!(parse_number("-infinity"), 0.0);
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(&json!(12)), 12);
        assert_eq!(to_count(&json!("7")), 7);
        assert_eq!(to_count(&json!(3.9)), 3);
        assert_eq!(to_count(&json!(-5)), 0);
        assert_eq!(to_count(&json!(true)), 1);
        assert_eq!(to_count(&json!("lots")), 0);
        assert_eq!(to_count(&json!(1e12)), u32::MAX);
    }

    #[test]
    fn test_to_flag() {
        assert!(to_flag(&json!(true)));
        assert!(to_flag(&json!(1)));
        assert!(to_flag(&json!("TRUE")));
        assert!(to_flag(&json!("yes")));
        assert!(!to_flag(&json!(0)));
        assert!(!to_flag(&json!("no")));
        assert!(!to_flag(&Value::Null));
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient::count")]
        kills: u32,
        #[serde(default, deserialize_with = "lenient::ratio")]
        kda: f64,
        #[serde(default, deserialize_with = "lenient::flag")]
        mvp: bool,
    }

    #[test]
    fn test_lenient_fields() {
        let row: Row = serde_json::from_str(r#"{"kills": "9", "kda": "1.5", "mvp": 1}"#).unwrap();
        assert_eq!(row.kills, 9);
        assert_eq!(row.kda, 1.5);
        assert!(row.mvp);
    }

    #[test]
    fn test_lenient_fields_missing_or_null() {
        let row: Row = serde_json::from_str(r#"{"kills": null}"#).unwrap();
        assert_eq!(row.kills, 0);
        assert_eq!(row.kda, 0.0);
        assert!(!row.mvp);
    }
}
