//! Marker records and the loose value rules applied to them.
//!
//! Records arrive as arbitrary JSON objects. Coordinates are coerced to
//! numbers rather than validated, filters compare with strict equality, and
//! identifier values are turned into string keys for the search index.

use serde_json::{Map, Value};

/// One input row keyed by field name.
pub type Record = Map<String, Value>;

/// Coerce a field value to a finite number.
///
/// Missing, null, false, empty and unparsable values all become `0`.
/// `true` is `1`. Numeric strings are trimmed and parsed, including `0x`,
/// `0o` and `0b` integer prefixes. Arrays, objects and non-finite results
/// become `0`. Negative zero is normalized so it groups with `0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let number = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_numeric(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => 0.0,
    };

    if !number.is_finite() || number == 0.0 {
        0.0
    } else {
        number
    }
}

fn parse_numeric(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&text[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(0.0);
    }

    // Rust accepts "inf" and "nan" spellings; both end up as 0 in the caller.
    text.parse::<f64>().unwrap_or(0.0)
}

/// Format a number the way it appears in grouping and index keys.
///
/// Follows the JavaScript number-to-string rules: shortest round-trip
/// digits, plain notation for exponents in `-7..21`, and `1e+21` or
/// `1.5e-7` style outside that range. Integral values print without a
/// fractional part (`1.0` -> `"1"`).
pub fn format_number(number: f64) -> String {
    if number == 0.0 || !number.is_finite() {
        return "0".to_string();
    }

    let sign = if number < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`.
    let scientific = format!("{:e}", number.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;
    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, exp_sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, exp_sign, exponent.abs())
        }
    };
    format!("{}{}", sign, body)
}

/// Strict equality between a record field and a filter value.
///
/// A missing field never matches. Numbers compare by value, so `1` and
/// `1.0` are equal. Arrays and objects never match.
pub fn strict_equals(field: Option<&Value>, expected: &Value) -> bool {
    let Some(actual) = field else {
        return false;
    };

    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => false,
    }
}

/// String key for an identifier value, or `None` when the value cannot key.
///
/// Strings key as themselves and numbers by [`format_number`], so `"1"` and
/// `1` share a key. Arrays and objects are not keyable.
pub fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Some(i.to_string()),
            (_, Some(u)) => Some(u.to_string()),
            _ => n.as_f64().map(format_number),
        },
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers_and_numeric_strings() {
        assert_eq!(coerce_number(Some(&json!(12.5))), 12.5);
        assert_eq!(coerce_number(Some(&json!(-3))), -3.0);
        assert_eq!(coerce_number(Some(&json!("1.00"))), 1.0);
        assert_eq!(coerce_number(Some(&json!("  -29.8258 "))), -29.8258);
        assert_eq!(coerce_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(coerce_number(Some(&json!("0x1A"))), 26.0);
    }

    #[test]
    fn test_coerce_degrades_to_zero() {
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_number(Some(&Value::Null)), 0.0);
        assert_eq!(coerce_number(Some(&json!(false))), 0.0);
        assert_eq!(coerce_number(Some(&json!(""))), 0.0);
        assert_eq!(coerce_number(Some(&json!("abc"))), 0.0);
        assert_eq!(coerce_number(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_number(Some(&json!("inf"))), 0.0);
        assert_eq!(coerce_number(Some(&json!([1, 2]))), 0.0);
        assert_eq!(coerce_number(Some(&json!({"a": 1}))), 0.0);
    }

    #[test]
    fn test_coerce_true_is_one() {
        assert_eq!(coerce_number(Some(&json!(true))), 1.0);
    }

    #[test]
    fn test_negative_zero_normalized() {
        let n = coerce_number(Some(&json!("-0")));
        assert!(n.is_sign_positive());
        assert_eq!(format_number(n), "0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-51.1481), "-51.1481");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1234.5), "1234.5");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_format_number_exponent_range() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(value_key(&json!(1e21)), Some("1e+21".to_string()));
        assert_eq!(value_key(&json!(1e-7)), Some("1e-7".to_string()));
    }

    #[test]
    fn test_strict_equals() {
        assert!(strict_equals(Some(&json!("high")), &json!("high")));
        assert!(strict_equals(Some(&json!(1)), &json!(1.0)));
        assert!(strict_equals(Some(&json!(true)), &json!(true)));
        assert!(strict_equals(Some(&Value::Null), &Value::Null));

        assert!(!strict_equals(Some(&json!("1")), &json!(1)));
        assert!(!strict_equals(None, &Value::Null));
        assert!(!strict_equals(Some(&json!([1])), &json!([1])));
        assert!(!strict_equals(Some(&json!({"a": 1})), &json!({"a": 1})));
    }

    #[test]
    fn test_value_key() {
        assert_eq!(value_key(&json!("abc")), Some("abc".to_string()));
        assert_eq!(value_key(&json!(42)), Some("42".to_string()));
        assert_eq!(value_key(&json!(1.0)), Some("1".to_string()));
        assert_eq!(value_key(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(value_key(&json!(false)), Some("false".to_string()));
        assert_eq!(value_key(&Value::Null), Some("null".to_string()));
        assert_eq!(value_key(&json!([1])), None);
    }
}
