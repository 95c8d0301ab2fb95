//! Derived feature: hint independence
//!
//! Fraction of a problem solved without hints. Runs after the hint-bound
//! repair so hint_count <= hint_total already holds and the value lands
//! in [0, 1] outside the hint_total = 0 branch.

use crate::columns::{HINT_COUNT, HINT_INDEPENDENCE, HINT_TOTAL};
use crate::dataset::{numeric, Dataset};
use serde_json::Value;
use tracing::info;

/// Add `hint_independence` = 1 - hint_count / effective hint_total.
///
/// A hint_total of 0 is treated as 1 to avoid division by zero, so the
/// degenerate no-hints row yields exactly 1.
pub fn add_hint_independence(dataset: Dataset) -> Dataset {
    let (mut columns, mut rows) = dataset.into_parts();
    if !columns.iter().any(|c| c == HINT_INDEPENDENCE) {
        columns.push(HINT_INDEPENDENCE.to_string());
    }

    for row in &mut rows {
        let count = row.get(HINT_COUNT).and_then(numeric).unwrap_or(0.0);
        let total = row.get(HINT_TOTAL).and_then(numeric).unwrap_or(0.0);
        let effective_total = if total == 0.0 { 1.0 } else { total };
        let independence = 1.0 - count / effective_total;
        row.insert(HINT_INDEPENDENCE.to_string(), Value::from(independence));
    }

    info!("Derived hint_independence for {} rows", rows.len());
    Dataset::from_rows(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(rows: &[Value]) -> Dataset {
        Dataset::from_rows(
            vec![HINT_COUNT.to_string(), HINT_TOTAL.to_string()],
            rows.iter().map(|v| v.as_object().unwrap().clone()).collect(),
        )
    }

    #[test]
    fn test_half_independence() {
        let ds = dataset(&[json!({"hint_count": 2, "hint_total": 4})]);
        let out = add_hint_independence(ds);
        assert_eq!(out.rows()[0]["hint_independence"], json!(0.5));
    }

    #[test]
    fn test_zero_total_guard() {
        let ds = dataset(&[json!({"hint_count": 0, "hint_total": 0})]);
        let out = add_hint_independence(ds);
        assert_eq!(out.rows()[0]["hint_independence"], json!(1.0));
    }

    #[test]
    fn test_full_hint_use() {
        let ds = dataset(&[json!({"hint_count": 3, "hint_total": 3})]);
        let out = add_hint_independence(ds);
        assert_eq!(out.rows()[0]["hint_independence"], json!(0.0));
    }

    #[test]
    fn test_column_registered_once() {
        let ds = dataset(&[json!({"hint_count": 1, "hint_total": 2})]);
        let out = add_hint_independence(add_hint_independence(ds));
        let count = out
            .columns()
            .iter()
            .filter(|c| *c == HINT_INDEPENDENCE)
            .count();
        assert_eq!(count, 1);
        assert_eq!(out.rows()[0]["hint_independence"], json!(0.5));
    }

    #[test]
    fn test_value_in_unit_interval_after_clamp() {
        // Post-repair rows always satisfy hint_count <= hint_total
        for (count, total) in [(0, 5), (2, 5), (5, 5), (0, 0)] {
            let ds = dataset(&[json!({"hint_count": count, "hint_total": total})]);
            let out = add_hint_independence(ds);
            let v = out.rows()[0]["hint_independence"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&v), "out of range: {}", v);
        }
    }
}
