//! Per-group response-time ordering check
//!
//! Diagnostic only: no cell is ever altered. The dataset does come back
//! re-ordered by (user_id, problem_id, ms_first_response), and that sort
//! order is what downstream consumers see.

use crate::columns::{MS_FIRST_RESPONSE, PROBLEM_ID, USER_ID};
use crate::dataset::{canonical_string, numeric, Dataset, Row};
use serde_json::Value;
use tracing::{info, warn};

/// Statistics for an ordering check
#[derive(Debug, Clone, Default)]
pub struct OrderStats {
    /// Number of (user_id, problem_id) groups examined
    pub groups_checked: usize,
    /// Groups whose response times were not non-decreasing
    pub unordered_groups: usize,
}

fn group_key(row: &Row) -> (String, String) {
    let user = row.get(USER_ID).map(canonical_string).unwrap_or_default();
    let problem = row.get(PROBLEM_ID).map(canonical_string).unwrap_or_default();
    (user, problem)
}

fn response_time(row: &Row) -> f64 {
    row.get(MS_FIRST_RESPONSE)
        .and_then(numeric)
        .unwrap_or(0.0)
}

/// Sort by (user_id, problem_id, ms_first_response) and count groups
/// whose response times are out of order. Ties satisfy monotonicity.
pub fn check_sequential_order(dataset: Dataset) -> (Dataset, OrderStats) {
    let (columns, mut rows) = dataset.into_parts();

    rows.sort_by(|a, b| {
        group_key(a)
            .cmp(&group_key(b))
            .then(response_time(a).total_cmp(&response_time(b)))
    });

    let mut stats = OrderStats::default();
    let mut current: Option<(String, String)> = None;
    let mut previous_time = f64::NEG_INFINITY;
    let mut group_ordered = true;

    for row in &rows {
        let key = group_key(row);
        let time = response_time(row);
        if current.as_ref() != Some(&key) {
            if current.is_some() && !group_ordered {
                stats.unordered_groups += 1;
            }
            current = Some(key);
            stats.groups_checked += 1;
            previous_time = time;
            group_ordered = true;
            continue;
        }
        if time < previous_time {
            group_ordered = false;
        }
        previous_time = time;
    }
    if current.is_some() && !group_ordered {
        stats.unordered_groups += 1;
    }

    if stats.unordered_groups > 0 {
        warn!(
            "{} of {} user-problem groups have out-of-order response times",
            stats.unordered_groups, stats.groups_checked
        );
    } else {
        info!(
            "Response-time ordering verified across {} groups",
            stats.groups_checked
        );
    }

    (Dataset::from_rows(columns, rows), stats)
}
