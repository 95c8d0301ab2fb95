//! Canonical type coercion for identifier and count columns
//!
//! Identifiers become strings (integral numbers render without a decimal
//! point); count columns become integers with the usual parse-failure
//! fallback to 0. Running the pass twice changes nothing.

use crate::columns::{COUNT_COLUMNS, IDENTIFIER_COLUMNS};
use crate::dataset::{canonical_string, numeric, Dataset};
use serde_json::Value;
use tracing::info;

/// Statistics for a type-coercion pass
#[derive(Debug, Clone, Default)]
pub struct CoerceStats {
    /// Count cells that failed numeric parsing and fell back to 0
    pub count_fallbacks: usize,
}

/// Cast identifier columns to strings and count columns to integers.
///
/// A count column absent from the header is materialized as all zeros so
/// the output projection always finds it.
pub fn coerce_types(dataset: Dataset) -> (Dataset, CoerceStats) {
    let (mut columns, mut rows) = dataset.into_parts();
    let mut stats = CoerceStats::default();

    for col in COUNT_COLUMNS {
        if !columns.iter().any(|c| c == col) {
            columns.push(col.to_string());
        }
    }

    for row in &mut rows {
        for col in IDENTIFIER_COLUMNS {
            if let Some(v) = row.get(col) {
                if !v.is_string() && !v.is_null() {
                    let text = canonical_string(v);
                    row.insert(col.to_string(), Value::String(text));
                }
            }
        }
        for col in COUNT_COLUMNS {
            let n = match row.get(col).and_then(numeric) {
                Some(f) => f.trunc() as i64,
                None => {
                    stats.count_fallbacks += 1;
                    0
                }
            };
            row.insert(col.to_string(), Value::from(n));
        }
    }

    info!(
        "Type coercion: {} count cells fell back to 0",
        stats.count_fallbacks
    );
    (Dataset::from_rows(columns, rows), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(columns: &[&str], rows: &[Value]) -> Dataset {
        Dataset::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|v| v.as_object().unwrap().clone()).collect(),
        )
    }

    #[test]
    fn test_numeric_identifiers_become_strings() {
        let ds = dataset(
            &["user_id", "skill_name"],
            &[json!({"user_id": 64525, "skill_name": "Box and Whisker"})],
        );
        let (out, _) = coerce_types(ds);
        assert_eq!(out.rows()[0]["user_id"], json!("64525"));
        assert_eq!(out.rows()[0]["skill_name"], json!("Box and Whisker"));
    }

    #[test]
    fn test_integral_float_identifier_has_no_decimal_point() {
        let ds = dataset(&["template_id"], &[json!({"template_id": 30799.0})]);
        let (out, _) = coerce_types(ds);
        assert_eq!(out.rows()[0]["template_id"], json!("30799"));
    }

    #[test]
    fn test_count_columns_become_integers() {
        let ds = dataset(
            &["attempt_count", "hint_count", "hint_total", "correct", "ms_first_response"],
            &[json!({
                "attempt_count": "3",
                "hint_count": 1.0,
                "hint_total": 2,
                "correct": 1,
                "ms_first_response": 481.9,
            })],
        );
        let (out, stats) = coerce_types(ds);
        assert_eq!(out.rows()[0]["attempt_count"], json!(3));
        assert_eq!(out.rows()[0]["hint_count"], json!(1));
        assert_eq!(out.rows()[0]["hint_total"], json!(2));
        assert_eq!(out.rows()[0]["ms_first_response"], json!(481));
        assert_eq!(stats.count_fallbacks, 0);
    }

    #[test]
    fn test_unparseable_count_falls_back_to_zero() {
        let ds = dataset(&["attempt_count"], &[json!({"attempt_count": "n/a"})]);
        let (out, stats) = coerce_types(ds);
        assert_eq!(out.rows()[0]["attempt_count"], json!(0));
        // Remaining four count columns were absent and also fell back
        assert_eq!(stats.count_fallbacks, 5);
    }

    #[test]
    fn test_absent_count_column_materialized_as_zeros() {
        let ds = dataset(&["user_id"], &[json!({"user_id": "u1"})]);
        let (out, _) = coerce_types(ds);
        assert!(out.has_column("ms_first_response"));
        assert_eq!(out.rows()[0]["ms_first_response"], json!(0));
        assert_eq!(out.rows()[0]["correct"], json!(0));
    }

    #[test]
    fn test_idempotent() {
        let ds = dataset(
            &["user_id", "hint_count"],
            &[json!({"user_id": 7, "hint_count": "2"})],
        );
        let (once, _) = coerce_types(ds);
        let (twice, stats) = coerce_types(once.clone());
        assert_eq!(once, twice);
        // Second run parses every materialized zero successfully
        assert_eq!(stats.count_fallbacks, 0);
    }
}
