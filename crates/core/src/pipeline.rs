//! Fixed-order cleaning pipeline
//!
//! Dedup, completeness filter, logic repair, response-time normalization,
//! feature derivation, type coercion, ordering check, then projection to
//! the 14 output columns. Internal stages never fail; every anomaly is
//! repaired, dropped, or counted.

use crate::coerce::coerce_types;
use crate::columns::{CRITICAL_COLUMNS, OUTPUT_COLUMNS};
use crate::completeness::drop_incomplete;
use crate::dataset::Dataset;
use crate::dedup::drop_duplicates;
use crate::features::add_hint_independence;
use crate::order::check_sequential_order;
use crate::repair::repair_logic;
use crate::response_time::{normalize_response_times, ResponseTimeConfig, DEFAULT_MAX_SECONDS};
use serde::Serialize;
use tracing::info;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Upper clamp for ms_first_response
    pub max_seconds: i64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            max_seconds: DEFAULT_MAX_SECONDS,
        }
    }
}

/// Aggregated statistics across all cleaning stages
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanStats {
    pub rows_in: usize,
    pub rows_out: usize,
    pub duplicates_removed: usize,
    pub incomplete_dropped: usize,
    pub correct_filled: usize,
    pub hint_clamps: usize,
    pub correct_coerced: usize,
    pub response_unparseable: usize,
    pub response_clamped: usize,
    pub count_fallbacks: usize,
    pub groups_checked: usize,
    pub unordered_groups: usize,
}

impl CleanStats {
    /// Fraction of input rows surviving to the output, as a percentage
    pub fn retention_rate(&self) -> f64 {
        if self.rows_in == 0 {
            0.0
        } else {
            (self.rows_out as f64 / self.rows_in as f64) * 100.0
        }
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

/// Run the full cleaning pipeline and project to the output column set.
pub fn clean(dataset: Dataset, config: &CleanConfig) -> (Dataset, CleanStats) {
    let mut stats = CleanStats {
        rows_in: dataset.len(),
        ..CleanStats::default()
    };
    info!("Cleaning pipeline starting with {} rows", stats.rows_in);

    let (dataset, dedup) = drop_duplicates(dataset);
    stats.duplicates_removed = dedup.duplicates_removed;

    let (dataset, completeness) = drop_incomplete(dataset, &CRITICAL_COLUMNS);
    stats.incomplete_dropped = completeness.rows_dropped;
    stats.correct_filled = completeness.correct_filled;

    let (dataset, repair) = repair_logic(dataset);
    stats.hint_clamps = repair.hint_clamps;
    stats.correct_coerced = repair.correct_coerced;

    let response_config = ResponseTimeConfig {
        max_seconds: config.max_seconds,
    };
    let (dataset, response) = normalize_response_times(dataset, &response_config);
    stats.response_unparseable = response.unparseable;
    stats.response_clamped = response.clamped;

    let dataset = add_hint_independence(dataset);

    let (dataset, coerce) = coerce_types(dataset);
    stats.count_fallbacks = coerce.count_fallbacks;

    let (dataset, order) = check_sequential_order(dataset);
    stats.groups_checked = order.groups_checked;
    stats.unordered_groups = order.unordered_groups;

    let dataset = dataset.project(&OUTPUT_COLUMNS);
    stats.rows_out = dataset.len();

    info!(
        "Cleaning pipeline finished: {} rows in, {} rows out ({:.1}% retained)",
        stats.rows_in,
        stats.rows_out,
        stats.retention_rate()
    );
    (dataset, stats)
}
