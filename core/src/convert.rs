//! Wire-format coercions for dataset fields.
//!
//! The upstream API serves dates as compact integers, timestamps in three
//! different textual layouts, and decimals with a comma separator. These
//! helpers are pure: null input passes through as `None`, malformed non-null
//! input fails with [`Error::Parse`], nothing is silently defaulted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A comma-decimal field after coercion.
///
/// Several datasets reuse the same column for measurements ("21,15") and
/// free text ("brak danych"), so the coerced value keeps both shapes.
/// Serializes untagged: numbers as JSON numbers, text as JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommaDecimal {
    Number(f64),
    Text(String),
}

impl CommaDecimal {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CommaDecimal::Number(n) => Some(*n),
            CommaDecimal::Text(_) => None,
        }
    }
}

/// Parse a compact `YYYYMMDD` integer date.
pub fn to_date(value: Option<i64>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(n) => NaiveDate::parse_from_str(&n.to_string(), "%Y%m%d")
            .map(Some)
            .map_err(|_| parse_err("compact date (YYYYMMDD)", &n.to_string())),
    }
}

/// Parse the first 19 characters as `YYYY-MM-DD HH:MM:SS`.
///
/// Some endpoints append fractional seconds without a separator
/// ("2021-01-01 12:15:43953745"); everything past the seconds is truncated,
/// never parsed.
pub fn to_datetime(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value {
        None => Ok(None),
        Some(s) => {
            let head: String = s.chars().take(19).collect();
            NaiveDateTime::parse_from_str(&head, "%Y-%m-%d %H:%M:%S")
                .map(Some)
                .map_err(|_| parse_err("timestamp (YYYY-MM-DD HH:MM:SS)", s))
        }
    }
}

/// Parse a 12-hour timestamp like `01-APR-22 12.38.06.000000 PM`.
pub fn to_datetime_12h(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s, "%d-%b-%y %I.%M.%S%.6f %p")
            .map(Some)
            .map_err(|_| parse_err("timestamp (DD-Mon-YY HH.MM.SS.ffffff AM/PM)", s)),
    }
}

/// Parse an ISO-like timestamp `YYYY-MM-DDTHH:MM:SS` (road-works dates).
pub fn to_datetime_t(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Some)
            .map_err(|_| parse_err("timestamp (YYYY-MM-DDTHH:MM:SS)", s)),
    }
}

/// Parse a time of day `HH:MM:SS`.
pub fn to_time(value: Option<&str>) -> Result<Option<NaiveTime>> {
    match value {
        None => Ok(None),
        Some(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
            .map(Some)
            .map_err(|_| parse_err("time of day (HH:MM:SS)", s)),
    }
}

/// Coerce a comma-decimal literal.
///
/// Every `,` becomes `.`; if the replaced string stripped of dots is all
/// ASCII digits it is parsed as a float, otherwise the replaced string is
/// returned as text. The digit check rejects a sign, so "-21,15" stays
/// textual — matching the upstream data where signed values never occur in
/// these columns.
pub fn comma_decimal(value: &str) -> Result<CommaDecimal> {
    let replaced = value.replace(',', ".");
    let digits: String = replaced.chars().filter(|c| *c != '.').collect();
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let number = replaced
            .parse::<f64>()
            .map_err(|_| parse_err("decimal number", value))?;
        Ok(CommaDecimal::Number(number))
    } else {
        Ok(CommaDecimal::Text(replaced))
    }
}

/// Flatten a nested JSON object into a single-level map.
///
/// Nested object keys are joined with `sep`; an object inside a list gets
/// the item index appended after the child key, so
/// `{"c": [{"d": "y"}]}` flattens to `{"c_d_0": "y"}`.
pub fn flatten(map: &Map<String, Value>, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(map, "", sep, None, &mut out);
    out
}

fn flatten_into(
    map: &Map<String, Value>,
    parent: &str,
    sep: &str,
    index: Option<usize>,
    out: &mut Map<String, Value>,
) {
    for (key, value) in map {
        let mut flat_key = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}{sep}{key}")
        };
        if let Some(i) = index {
            flat_key = format!("{flat_key}_{i}");
        }
        match value {
            Value::Object(nested) => flatten_into(nested, &flat_key, sep, None, out),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if let Value::Object(nested) = item {
                        flatten_into(nested, &flat_key, sep, Some(i), out);
                    } else {
                        out.insert(flat_key.clone(), item.clone());
                    }
                }
            }
            scalar => {
                out.insert(flat_key, scalar.clone());
            }
        }
    }
}

fn parse_err(expected: &'static str, value: &str) -> Error {
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
    fn to_date_parses_compact_integer() {
        let date = to_date(Some(20221201)).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 12, 1));
    }

    #[test]
    fn to_date_passes_null_through() {
        assert_eq!(to_date(None).unwrap(), None);
    }

    #[test]
    fn to_date_rejects_malformed_integer() {
        assert!(matches!(to_date(Some(2022)), Err(Error::Parse { .. })));
    }

    #[test]
    fn to_datetime_truncates_trailing_garbage() {
        let dt = to_datetime(Some("2021-01-01 12:15:43953745")).unwrap().unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_opt(12, 15, 43)
                .unwrap()
        );
    }

    #[test]
    fn to_datetime_passes_null_through() {
        assert_eq!(to_datetime(None).unwrap(), None);
    }

    #[test]
    fn to_datetime_rejects_malformed_input() {
        assert!(matches!(
            to_datetime(Some("yesterday")),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn to_datetime_12h_parses_meridiem_format() {
        let dt = to_datetime_12h(Some("01-APR-22 12.38.06.000000 PM"))
            .unwrap()
            .unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2022, 4, 1)
                .unwrap()
                .and_hms_opt(12, 38, 6)
                .unwrap()
        );
    }

    #[test]
    fn to_datetime_12h_resolves_pm_hours() {
        let dt = to_datetime_12h(Some("01-APR-22 01.00.00.000000 PM"))
            .unwrap()
            .unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "13:00:00");
    }

    #[test]
    fn to_datetime_t_parses_iso_like_format() {
        let dt = to_datetime_t(Some("2023-05-05T07:30:00")).unwrap().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-05-05 07:30:00");
    }

    #[test]
    fn to_time_parses_time_of_day() {
        let t = to_time(Some("12:12:12")).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(12, 12, 12));
    }

    #[test]
    fn to_time_passes_null_through() {
        assert_eq!(to_time(None).unwrap(), None);
    }

    #[test]
    fn comma_decimal_parses_comma_separated_value() {
        assert_eq!(comma_decimal("21,15").unwrap(), CommaDecimal::Number(21.15));
    }

    #[test]
    fn comma_decimal_parses_plain_integer() {
        assert_eq!(comma_decimal("5").unwrap(), CommaDecimal::Number(5.0));
    }

    #[test]
    fn comma_decimal_keeps_signed_value_as_replaced_text() {
        // The digit check runs on the comma-replaced string, so a sign makes
        // the value textual, with commas already replaced.
        assert_eq!(
            comma_decimal("-21,15").unwrap(),
            CommaDecimal::Text("-21.15".to_string())
        );
    }

    #[test]
    fn comma_decimal_keeps_free_text() {
        assert_eq!(
            comma_decimal("brak danych").unwrap(),
            CommaDecimal::Text("brak danych".to_string())
        );
    }

    #[test]
    fn comma_decimal_rejects_multiple_separators() {
        assert!(matches!(comma_decimal("1,2,3"), Err(Error::Parse { .. })));
    }

    #[test]
    fn comma_decimal_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(CommaDecimal::Number(21.15)).unwrap(),
            json!(21.15)
        );
        assert_eq!(
            serde_json::to_value(CommaDecimal::Text("brak".into())).unwrap(),
            json!("brak")
        );
    }

    #[test]
    fn flatten_joins_nested_keys() {
        let map = json!({
            "key_1": "value_1",
            "key_2": {"nested_key_1": "nested_value_1", "nested_key_2": "nested_value_2"},
            "key_3": {"nested_key_3": "nested_value_3"},
        });
        let Value::Object(map) = map else { unreachable!() };
        let flat = flatten(&map, "_");
        assert_eq!(
            Value::Object(flat),
            json!({
                "key_1": "value_1",
                "key_2_nested_key_1": "nested_value_1",
                "key_2_nested_key_2": "nested_value_2",
                "key_3_nested_key_3": "nested_value_3",
            })
        );
    }

    #[test]
    fn flatten_indexes_objects_inside_lists() {
        let map = json!({"a": {"b": "x"}, "c": [{"d": "y"}]});
        let Value::Object(map) = map else { unreachable!() };
        let flat = flatten(&map, "_");
        assert_eq!(Value::Object(flat), json!({"a_b": "x", "c_d_0": "y"}));
    }

    #[test]
    fn flatten_repeats_index_per_list_item() {
        let map = json!({"key_1": [{"nested_key": "v"}, {"nested_key": "v"}]});
        let Value::Object(map) = map else { unreachable!() };
        let flat = flatten(&map, "_");
        assert_eq!(
            Value::Object(flat),
            json!({"key_1_nested_key_0": "v", "key_1_nested_key_1": "v"})
        );
    }

    #[test]
    fn flatten_keeps_scalar_list_items_under_parent_key() {
        let map = json!({"coords": [21.0, 52.2]});
        let Value::Object(map) = map else { unreachable!() };
        let flat = flatten(&map, "_");
        // Scalar items share the parent key; the last one wins.
        assert_eq!(Value::Object(flat), json!({"coords": 52.2}));
    }
}
