//! Domain-invariant repairs: hint bound and boolean outcome domain
//!
//! Both rules touch disjoint columns, so their order does not matter.
//! Rows are repaired in place, never added or removed.

use crate::columns::{CORRECT, HINT_COUNT, HINT_TOTAL};
use crate::dataset::{numeric, Dataset};
use serde_json::Value;
use tracing::{info, warn};

/// Statistics for a logic-repair pass
#[derive(Debug, Clone, Default)]
pub struct RepairStats {
    /// Rows where hint_count was clamped down to hint_total
    pub hint_clamps: usize,
    /// Rows where `correct` was forced into {0, 1}
    pub correct_coerced: usize,
}

/// Clamp hint_count down to hint_total wherever the bound is violated.
///
/// The clamp only ever lowers hint_count; hint_total is never raised.
pub fn clamp_hint_counts(dataset: Dataset) -> (Dataset, usize) {
    let (columns, mut rows) = dataset.into_parts();
    let mut clamped = 0;

    for row in &mut rows {
        let count = row.get(HINT_COUNT).and_then(numeric);
        let total = row.get(HINT_TOTAL).and_then(numeric);
        if let (Some(count), Some(total)) = (count, total) {
            if count > total {
                let total_value = row.get(HINT_TOTAL).cloned().unwrap_or(Value::Null);
                row.insert(HINT_COUNT.to_string(), total_value);
                clamped += 1;
            }
        }
    }

    if clamped > 0 {
        warn!("Clamped hint_count > hint_total in {} rows", clamped);
    }
    (Dataset::from_rows(columns, rows), clamped)
}

/// Force `correct` into {0, 1} by truthiness.
///
/// Anything that is not exactly integer 0 or 1 is coerced: non-zero
/// numbers and non-empty strings not parseable as 0 become 1, everything
/// else becomes 0.
pub fn coerce_correct_domain(dataset: Dataset) -> (Dataset, usize) {
    let (columns, mut rows) = dataset.into_parts();
    if !columns.iter().any(|c| c == CORRECT) {
        return (Dataset::from_rows(columns, rows), 0);
    }

    let mut coerced = 0;
    for row in &mut rows {
        let in_domain = matches!(
            row.get(CORRECT).and_then(Value::as_i64),
            Some(0) | Some(1)
        );
        if !in_domain {
            let flag = row.get(CORRECT).map(truthy).unwrap_or(false);
            row.insert(CORRECT.to_string(), Value::from(i64::from(flag)));
            coerced += 1;
        }
    }

    if coerced > 0 {
        warn!("Coerced out-of-domain correct values in {} rows", coerced);
    }
    (Dataset::from_rows(columns, rows), coerced)
}

/// Truthiness of a raw cell: non-zero and non-missing means true.
///
/// Negative numbers and non-boolean numeric codes count as true; a string
/// counts as true unless it is empty or parses to zero.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => f != 0.0,
            Err(_) => !s.trim().is_empty(),
        },
        _ => true,
    }
}

/// Run both repair rules and report combined statistics.
pub fn repair_logic(dataset: Dataset) -> (Dataset, RepairStats) {
    let (dataset, hint_clamps) = clamp_hint_counts(dataset);
    let (dataset, correct_coerced) = coerce_correct_domain(dataset);
    info!(
        "Logic repair: {} hint clamps, {} correct coercions",
        hint_clamps, correct_coerced
    );
    (
        dataset,
        RepairStats {
            hint_clamps,
            correct_coerced,
        },
    )
}
