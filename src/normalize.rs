//! Result normalization for both raw response shapes.
//!
//! Flattens a [`RawResult`] into an ordered sequence of [`Row`] maps,
//! preserving row order and column order exactly as the backend supplied
//! them. Empty row sets normalize to an empty vector, never an error.

use serde_json::Value as JsonValue;

use crate::models::{ColumnarResult, DriverResult, RawResult, Row};

/// Flatten either raw result shape into plain rows.
pub fn normalize(raw: &RawResult) -> Vec<Row> {
    match raw {
        RawResult::Columnar(result) => normalize_columnar(result),
        RawResult::Driver(result) => normalize_driver(result),
    }
}

/// Columnar shape: `record[cols[i].name] = row[i].value`.
fn normalize_columnar(result: &ColumnarResult) -> Vec<Row> {
    result
        .rows
        .iter()
        .map(|cells| {
            let mut record = Row::new();
            for (i, col) in result.cols.iter().enumerate() {
                let value = cells.get(i).map(|cell| cell.value.clone());
                record.insert(col.name.clone(), value.unwrap_or(JsonValue::Null));
            }
            record
        })
        .collect()
}

/// Driver row shape: named lookup first, then stringified-index fallback.
///
/// The fallback is a compatibility shim for drivers that key row values by
/// position rather than by column name; both representations are accepted.
fn normalize_driver(result: &DriverResult) -> Vec<Row> {
    result
        .rows
        .iter()
        .map(|row| {
            let mut record = Row::new();
            for (i, name) in result.columns.iter().enumerate() {
                let value = match row.get(name) {
                    Some(value) => value.clone(),
                    None => row.get(i.to_string()).cloned().unwrap_or(JsonValue::Null),
                };
                record.insert(name.clone(), value);
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columnar_round_trip() {
        let raw: RawResult = serde_json::from_value(json!({
            "cols": [{"name": "id"}, {"name": "name"}],
            "rows": [[{"type": "text", "value": "1"}, {"type": "text", "value": "a"}]]
        }))
        .unwrap();

        let rows = normalize(&raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!("1"));
        assert_eq!(rows[0]["name"], json!("a"));
    }

    #[test]
    fn test_columnar_preserves_column_order() {
        let raw: RawResult = serde_json::from_value(json!({
            "cols": [{"name": "z"}, {"name": "a"}, {"name": "m"}],
            "rows": [[{"value": 1}, {"value": 2}, {"value": 3}]]
        }))
        .unwrap();

        let rows = normalize(&raw);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_driver_named_round_trip() {
        let raw = RawResult::Driver(DriverResult {
            columns: vec!["id".into(), "name".into()],
            rows: vec![json!({"id": "1", "name": "a"})],
        });

        let rows = normalize(&raw);
        assert_eq!(rows[0]["id"], json!("1"));
        assert_eq!(rows[0]["name"], json!("a"));
    }

    #[test]
    fn test_driver_positional_fallback() {
        let raw = RawResult::Driver(DriverResult {
            columns: vec!["id".into(), "name".into()],
            rows: vec![json!({"0": "1", "1": "a"})],
        });

        let rows = normalize(&raw);
        assert_eq!(rows[0]["id"], json!("1"));
        assert_eq!(rows[0]["name"], json!("a"));
    }

    // A named key that is present but null must not fall through to the
    // positional value; presence decides the lookup, not truthiness.
    #[test]
    fn test_driver_named_null_is_not_overridden() {
        let raw = RawResult::Driver(DriverResult {
            columns: vec!["id".into()],
            rows: vec![json!({"id": null, "0": "fallback"})],
        });

        let rows = normalize(&raw);
        assert!(rows[0]["id"].is_null());
    }

    #[test]
    fn test_empty_rows_normalize_to_empty_vec() {
        let columnar: RawResult = serde_json::from_value(json!({
            "cols": [{"name": "id"}],
            "rows": []
        }))
        .unwrap();
        assert!(normalize(&columnar).is_empty());

        let driver = RawResult::Driver(DriverResult {
            columns: vec!["id".into()],
            rows: vec![],
        });
        assert!(normalize(&driver).is_empty());
    }

    #[test]
    fn test_rows_are_not_reordered() {
        let raw: RawResult = serde_json::from_value(json!({
            "cols": [{"name": "n"}],
            "rows": [[{"value": 3}], [{"value": 1}], [{"value": 2}]]
        }))
        .unwrap();

        let rows = normalize(&raw);
        let values: Vec<i64> = rows.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(values, [3, 1, 2]);
    }
}
