//! Field extraction from raw dataset records.
//!
//! Every helper takes the dataset name and the upstream key so that any
//! failure names exactly what was missing or malformed. The upstream is
//! loose about scalar types (numbers sometimes arrive quoted and vice
//! versa), so the numeric helpers accept both shapes.

use serde_json::Value;

use crate::convert::{comma_decimal, CommaDecimal};
use crate::error::{Error, Result};

pub(crate) fn field<'a>(raw: &'a Value, dataset: &'static str, key: &str) -> Result<&'a Value> {
    raw.get(key).ok_or_else(|| Error::MissingField {
        dataset,
        field: key.to_string(),
    })
}

/// Required string; numbers are rendered to text.
pub(crate) fn str_field(raw: &Value, dataset: &'static str, key: &str) -> Result<String> {
    match field(raw, dataset, key)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(type_err("string", other)),
    }
}

/// Optional string: absent or null yields `None`.
pub(crate) fn opt_str_field(
    raw: &Value,
    _dataset: &'static str,
    key: &str,
) -> Result<Option<String>> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(type_err("string", other)),
    }
}

/// Required key whose value may be null.
pub(crate) fn nullable_str_field(
    raw: &Value,
    dataset: &'static str,
    key: &str,
) -> Result<Option<String>> {
    match field(raw, dataset, key)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(type_err("string", other)),
    }
}

/// Required integer; numeric strings are parsed.
pub(crate) fn int_field(raw: &Value, dataset: &'static str, key: &str) -> Result<i64> {
    int_value(field(raw, dataset, key)?)
}

/// Required key holding an integer, a numeric string, null, or an empty
/// string (the education datasets leave flag cells blank).
pub(crate) fn opt_int_field(
    raw: &Value,
    dataset: &'static str,
    key: &str,
) -> Result<Option<i64>> {
    match field(raw, dataset, key)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        value => int_value(value).map(Some),
    }
}

/// Required float; numeric strings are parsed.
pub(crate) fn f64_field(raw: &Value, dataset: &'static str, key: &str) -> Result<f64> {
    f64_value(field(raw, dataset, key)?)
}

pub(crate) fn f64_value(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| type_err("number", &Value::Number(n.clone()))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| Error::Parse {
            expected: "number",
            value: s.clone(),
        }),
        other => Err(type_err("number", other)),
    }
}

/// Required comma-decimal field.
pub(crate) fn comma_field(
    raw: &Value,
    dataset: &'static str,
    key: &str,
) -> Result<CommaDecimal> {
    match field(raw, dataset, key)? {
        Value::String(s) => comma_decimal(s),
        Value::Number(n) => n
            .as_f64()
            .map(CommaDecimal::Number)
            .ok_or_else(|| type_err("decimal number", &Value::Number(n.clone()))),
        other => Err(type_err("decimal number", other)),
    }
}

pub(crate) fn array_field<'a>(
    raw: &'a Value,
    dataset: &'static str,
    key: &str,
) -> Result<&'a Vec<Value>> {
    match field(raw, dataset, key)? {
        Value::Array(items) => Ok(items),
        other => Err(type_err("list", other)),
    }
}

pub(crate) fn object_field<'a>(
    raw: &'a Value,
    dataset: &'static str,
    key: &str,
) -> Result<&'a Value> {
    let value = field(raw, dataset, key)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(type_err("object", value))
    }
}

fn int_value(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| type_err("integer", &Value::Number(n.clone()))),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| Error::Parse {
            expected: "integer",
            value: s.clone(),
        }),
        other => Err(type_err("integer", other)),
    }
}

fn type_err(expected: &'static str, value: &Value) -> Error {
    Error::Parse {
        expected,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_names_dataset_and_field() {
        let raw = json!({});
        let err = str_field(&raw, "trees", "dzielnica").unwrap_err();
        match err {
            Error::MissingField { dataset, field } => {
                assert_eq!(dataset, "trees");
                assert_eq!(field, "dzielnica");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn numeric_strings_parse_as_numbers() {
        let raw = json!({"n": "12", "f": "52.21"});
        assert_eq!(int_field(&raw, "t", "n").unwrap(), 12);
        assert_eq!(f64_field(&raw, "t", "f").unwrap(), 52.21);
    }

    #[test]
    fn quoted_and_unquoted_scalars_both_work() {
        let raw = json!({"a": 7, "b": "7"});
        assert_eq!(str_field(&raw, "t", "a").unwrap(), "7");
        assert_eq!(int_field(&raw, "t", "b").unwrap(), 7);
    }

    #[test]
    fn opt_int_treats_blank_and_null_as_none() {
        let raw = json!({"a": null, "b": "", "c": 3});
        assert_eq!(opt_int_field(&raw, "t", "a").unwrap(), None);
        assert_eq!(opt_int_field(&raw, "t", "b").unwrap(), None);
        assert_eq!(opt_int_field(&raw, "t", "c").unwrap(), Some(3));
    }

    #[test]
    fn malformed_integer_is_a_parse_error() {
        let raw = json!({"n": "twelve"});
        assert!(matches!(
            int_field(&raw, "t", "n"),
            Err(Error::Parse { .. })
        ));
    }
}
