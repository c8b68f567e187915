//! Cache Statistics Module
//!
//! Tracks per-namespace hit, miss and expiry counters.

use serde::Serialize;

// == Cache Stats ==
/// Counters for one cache namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of reads answered from the cache
    pub hits: u64,
    /// Number of reads that found nothing usable (absent or expired)
    pub misses: u64,
    /// Number of entries dropped on read because they had expired
    pub expired: u64,
    /// Number of entries dropped by the background sweep
    pub swept: u64,
    /// Current number of entries in the namespace
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a lazy eviction. The read that found it is a miss too.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.misses += 1;
    }

    pub fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Snapshot ==
/// Statistics for all three namespaces at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStatsSnapshot {
    pub enabled: bool,
    pub films: CacheStats,
    pub ratings: CacheStats,
    pub watchlists: CacheStats,
}

impl CacheStatsSnapshot {
    /// Total entries held across every namespace.
    pub fn total_entries(&self) -> usize {
        self.films.total_entries + self.ratings.total_entries + self.watchlists.total_entries
    }
}

// == Sweep Report ==
/// Number of expired entries removed from each namespace by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub films: usize,
    pub ratings: usize,
    pub watchlists: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.films + self.ratings + self.watchlists
    }
}
