//! Response-latency normalization
//!
//! `ms_first_response` is coerced to a number (unparseable cells fall
//! back to 0, silently) and clamped above by `max_seconds`. An entirely
//! absent column is a no-op here; type coercion materializes it later.

use crate::columns::MS_FIRST_RESPONSE;
use crate::dataset::{number_value, numeric, Dataset};
use serde_json::Value;
use tracing::info;

/// Default upper clamp for response latency
pub const DEFAULT_MAX_SECONDS: i64 = 3600;

/// Configuration for response-time normalization
#[derive(Debug, Clone)]
pub struct ResponseTimeConfig {
    /// Upper bound; values above it are clamped down to it
    pub max_seconds: i64,
}

impl Default for ResponseTimeConfig {
    fn default() -> Self {
        Self {
            max_seconds: DEFAULT_MAX_SECONDS,
        }
    }
}

/// Statistics for a normalization pass
#[derive(Debug, Clone, Default)]
pub struct ResponseTimeStats {
    /// Cells that failed numeric parsing and fell back to 0
    pub unparseable: usize,
    /// Cells clamped down to max_seconds
    pub clamped: usize,
}

/// Coerce `ms_first_response` to numbers and clamp the upper bound.
pub fn normalize_response_times(
    dataset: Dataset,
    config: &ResponseTimeConfig,
) -> (Dataset, ResponseTimeStats) {
    let mut stats = ResponseTimeStats::default();
    if !dataset.has_column(MS_FIRST_RESPONSE) {
        return (dataset, stats);
    }

    let max = config.max_seconds as f64;
    let (columns, mut rows) = dataset.into_parts();
    for row in &mut rows {
        match row.get(MS_FIRST_RESPONSE).and_then(numeric) {
            None => {
                row.insert(MS_FIRST_RESPONSE.to_string(), Value::from(0));
                stats.unparseable += 1;
            }
            Some(f) if f > max => {
                row.insert(MS_FIRST_RESPONSE.to_string(), Value::from(config.max_seconds));
                stats.clamped += 1;
            }
            Some(f) => {
                row.insert(MS_FIRST_RESPONSE.to_string(), number_value(f));
            }
        }
    }

    info!(
        "Response-time normalization: {} fallbacks, {} clamped",
        stats.unparseable, stats.clamped
    );
    (Dataset::from_rows(columns, rows), stats)
}
