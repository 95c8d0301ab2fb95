//! Critical-column completeness filtering
//!
//! Rows missing any critical field are dropped whole. Separately, a
//! missing outcome flag is a fill, never a drop: `correct` gets 0.

use crate::columns::CORRECT;
use crate::dataset::{is_missing, numeric, Dataset, Row};
use serde_json::Value;
use tracing::info;

/// Statistics for a completeness pass
#[derive(Debug, Clone, Default)]
pub struct CompletenessStats {
    /// Rows dropped for a missing critical field
    pub rows_dropped: usize,
    /// Missing `correct` cells filled with 0
    pub correct_filled: usize,
}

/// Drop rows with any missing critical column and fill missing `correct`.
///
/// If a `correct` column exists, missing values become integer 0 and
/// numeric values are cast to integers. Unparseable `correct` cells are
/// left alone for the boolean-domain repair to resolve.
pub fn drop_incomplete(dataset: Dataset, critical: &[&str]) -> (Dataset, CompletenessStats) {
    let (columns, rows) = dataset.into_parts();
    let has_correct = columns.iter().any(|c| c == CORRECT);
    let mut stats = CompletenessStats::default();

    let mut kept: Vec<Row> = Vec::with_capacity(rows.len());
    for mut row in rows {
        if critical.iter().any(|col| is_missing(&row, col)) {
            stats.rows_dropped += 1;
            continue;
        }
        if has_correct {
            fill_correct(&mut row, &mut stats);
        }
        kept.push(row);
    }

    info!(
        "Completeness filter: {} rows dropped, {} rows kept",
        stats.rows_dropped,
        kept.len()
    );
    (Dataset::from_rows(columns, kept), stats)
}

fn fill_correct(row: &mut Row, stats: &mut CompletenessStats) {
    match row.get(CORRECT) {
        None | Some(Value::Null) => {
            row.insert(CORRECT.to_string(), Value::from(0));
            stats.correct_filled += 1;
        }
        Some(v) if !v.is_i64() && !v.is_u64() => {
            // Integer cast of float or numeric-string cells
            if let Some(f) = numeric(v) {
                row.insert(CORRECT.to_string(), Value::from(f.trunc() as i64));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::CRITICAL_COLUMNS;
    use serde_json::{json, Value};

    fn dataset(columns: &[&str], rows: &[Value]) -> Dataset {
        Dataset::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|v| v.as_object().unwrap().clone()).collect(),
        )
    }

    fn full_row(skill_id: Value, correct: Value) -> Value {
        json!({
            "user_id": 1, "problem_id": 2, "template_id": 3,
            "skill_id": skill_id, "skill_name": "frac", "teacher_id": 4,
            "student_class_id": 5, "school_id": 6,
            "hint_count": 0, "hint_total": 3, "correct": correct,
        })
    }

    const COLUMNS: [&str; 11] = [
        "user_id", "problem_id", "template_id", "skill_id", "skill_name",
        "teacher_id", "student_class_id", "school_id",
        "hint_count", "hint_total", "correct",
    ];

    #[test]
    fn test_missing_critical_field_drops_row() {
        let ds = dataset(
            &COLUMNS,
            &[full_row(json!(7), json!(1)), full_row(json!(null), json!(1))],
        );
        let (out, stats) = drop_incomplete(ds, &CRITICAL_COLUMNS);
        assert_eq!(out.len(), 1);
        assert_eq!(stats.rows_dropped, 1);
    }

    #[test]
    fn test_missing_correct_is_filled_not_dropped() {
        let ds = dataset(&COLUMNS, &[full_row(json!(7), json!(null))]);
        let (out, stats) = drop_incomplete(ds, &CRITICAL_COLUMNS);
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0]["correct"], json!(0));
        assert_eq!(stats.correct_filled, 1);
    }

    #[test]
    fn test_float_correct_cast_to_integer() {
        let ds = dataset(&COLUMNS, &[full_row(json!(7), json!(1.0))]);
        let (out, _) = drop_incomplete(ds, &CRITICAL_COLUMNS);
        assert_eq!(out.rows()[0]["correct"], json!(1));
    }

    #[test]
    fn test_unparseable_correct_left_for_repair() {
        let ds = dataset(&COLUMNS, &[full_row(json!(7), json!("yes"))]);
        let (out, _) = drop_incomplete(ds, &CRITICAL_COLUMNS);
        assert_eq!(out.rows()[0]["correct"], json!("yes"));
    }

    #[test]
    fn test_absent_correct_column_is_tolerated() {
        let ds = dataset(&["user_id"], &[json!({"user_id": 1})]);
        let (out, stats) = drop_incomplete(ds, &["user_id"]);
        assert_eq!(out.len(), 1);
        assert_eq!(stats.correct_filled, 0);
    }

    #[test]
    fn test_empty_input() {
        let ds = dataset(&COLUMNS, &[]);
        let (out, stats) = drop_incomplete(ds, &CRITICAL_COLUMNS);
        assert!(out.is_empty());
        assert_eq!(stats.rows_dropped, 0);
    }
}
