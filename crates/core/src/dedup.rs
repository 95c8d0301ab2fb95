//! Exact duplicate removal over whole rows
//!
//! Rows are fingerprinted across all columns in header order; a bloom
//! filter fronts the hash set for fast negative lookups.

use crate::dataset::{Dataset, Row};
use ahash::{AHashSet, AHasher};
use bloomfilter::Bloom;
use serde_json::Value;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

/// Statistics for a deduplication pass
#[derive(Debug, Clone, Default)]
pub struct DedupStats {
    /// Total number of rows seen
    pub total_seen: usize,
    /// Number of duplicate rows removed
    pub duplicates_removed: usize,
    /// Number of bloom filter hits (potential duplicates)
    pub bloom_hits: usize,
    /// Number of bloom filter misses (definitely unique)
    pub bloom_misses: usize,
}

impl DedupStats {
    /// Get the deduplication rate as a percentage
    pub fn dedup_rate(&self) -> f64 {
        if self.total_seen == 0 {
            0.0
        } else {
            (self.duplicates_removed as f64 / self.total_seen as f64) * 100.0
        }
    }
}

/// Exact row deduplicator with bloom filter optimization
pub struct Deduplicator {
    /// Column order used for fingerprinting
    columns: Vec<String>,
    /// Set of seen fingerprints
    seen: AHashSet<u64>,
    /// Bloom filter for quick negative lookups
    bloom: Bloom<u64>,
    stats: DedupStats,
}

impl Deduplicator {
    /// Create a deduplicator sized for the expected row count.
    ///
    /// The bloom filter is configured for ~1% false positive rate.
    pub fn with_capacity(columns: &[String], capacity: usize) -> Self {
        let capacity = capacity.max(16);
        debug!("Creating Deduplicator with capacity {}", capacity);
        Self {
            columns: columns.to_vec(),
            seen: AHashSet::with_capacity(capacity),
            bloom: Bloom::new_for_fp_rate(capacity, 0.01),
            stats: DedupStats::default(),
        }
    }

    /// Fingerprint a row across all columns in header order.
    ///
    /// Absent keys and explicit nulls hash identically, so rows that
    /// differ only in how missingness is spelled still collide.
    fn fingerprint(&self, row: &Row) -> u64 {
        let mut hasher = AHasher::default();
        for col in &self.columns {
            match row.get(col) {
                Some(v) => v.to_string().hash(&mut hasher),
                None => Value::Null.to_string().hash(&mut hasher),
            }
        }
        hasher.finish()
    }

    /// Check whether a row repeats one already seen.
    pub fn is_duplicate(&mut self, row: &Row) -> bool {
        self.stats.total_seen += 1;
        let hash = self.fingerprint(row);

        if !self.bloom.check(&hash) {
            // Definitely not seen before
            self.bloom.set(&hash);
            self.seen.insert(hash);
            self.stats.bloom_misses += 1;
            return false;
        }

        self.stats.bloom_hits += 1;
        if self.seen.contains(&hash) {
            self.stats.duplicates_removed += 1;
            true
        } else {
            // Bloom filter false positive
            self.seen.insert(hash);
            false
        }
    }

    pub fn stats(&self) -> &DedupStats {
        &self.stats
    }

    /// Number of unique fingerprints stored
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }
}

/// Drop exact-duplicate rows, keeping the first occurrence of each.
pub fn drop_duplicates(dataset: Dataset) -> (Dataset, DedupStats) {
    let (columns, rows) = dataset.into_parts();
    let mut dedup = Deduplicator::with_capacity(&columns, rows.len());

    let kept: Vec<Row> = rows.into_iter().filter(|r| !dedup.is_duplicate(r)).collect();

    let stats = dedup.stats().clone();
    info!(
        "Duplicate removal: {} of {} rows removed",
        stats.duplicates_removed, stats.total_seen
    );
    (Dataset::from_rows(columns, kept), stats)
}
