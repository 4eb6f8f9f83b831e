//! Read-only solve counters for external reporters.
//!
//! The driver updates these as it runs; progress reporters poll
//! `snapshot()` between iterations. Counters only ever grow, except
//! `pool_remaining` which tracks the shrinking candidate pool.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the solve counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Scoring batches run so far (one per iteration).
    pub iterations: u64,
    /// Candidate evaluations performed across all batches.
    pub candidates_scored: u64,
    /// Selections accepted into the solution.
    pub sets_selected: u64,
    /// Include elements covered so far.
    pub include_covered: u64,
    /// Exclude elements covered so far.
    pub exclude_covered: u64,
    /// Candidates still eligible.
    pub pool_remaining: u64,
}

/// Thread-safe collector for solve counters.
#[derive(Debug, Default)]
pub struct StatsCollector {
    iterations: AtomicU64,
    candidates_scored: AtomicU64,
    sets_selected: AtomicU64,
    include_covered: AtomicU64,
    exclude_covered: AtomicU64,
    pool_remaining: AtomicU64,
}

impl StatsCollector {
    /// Creates a collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_pool_remaining(&self, remaining: u64) {
        self.pool_remaining.store(remaining, Ordering::Relaxed);
    }

    pub(crate) fn record_batch(&self, scored: u64) {
        self.iterations.fetch_add(1, Ordering::Relaxed);
        self.candidates_scored.fetch_add(scored, Ordering::Relaxed);
    }

    pub(crate) fn record_selection(&self, new_include: u64, new_exclude: u64, remaining: u64) {
        self.sets_selected.fetch_add(1, Ordering::Relaxed);
        self.include_covered.fetch_add(new_include, Ordering::Relaxed);
        self.exclude_covered.fetch_add(new_exclude, Ordering::Relaxed);
        self.pool_remaining.store(remaining, Ordering::Relaxed);
    }

    /// Returns the number of iterations run so far.
    pub fn iterations(&self) -> u64 {
        self.iterations.load(Ordering::Relaxed)
    }

    /// Returns the number of selections accepted so far.
    pub fn sets_selected(&self) -> u64 {
        self.sets_selected.load(Ordering::Relaxed)
    }

    /// Takes a snapshot of the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            iterations: self.iterations.load(Ordering::Relaxed),
            candidates_scored: self.candidates_scored.load(Ordering::Relaxed),
            sets_selected: self.sets_selected.load(Ordering::Relaxed),
            include_covered: self.include_covered.load(Ordering::Relaxed),
            exclude_covered: self.exclude_covered.load(Ordering::Relaxed),
            pool_remaining: self.pool_remaining.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_batch() {
        let stats = StatsCollector::new();
        stats.record_batch(3);
        stats.record_batch(2);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.iterations, 2);
        assert_eq!(snapshot.candidates_scored, 5);
    }

    #[test]
    fn test_record_selection() {
        let stats = StatsCollector::new();
        stats.set_pool_remaining(3);
        stats.record_selection(2, 1, 2);
        stats.record_selection(1, 0, 1);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.sets_selected, 2);
        assert_eq!(snapshot.include_covered, 3);
        assert_eq!(snapshot.exclude_covered, 1);
        assert_eq!(snapshot.pool_remaining, 1);
    }

    #[test]
    fn test_snapshot_does_not_consume() {
        let stats = StatsCollector::new();
        stats.record_batch(1);
        let first = stats.snapshot();
        stats.record_batch(1);
        let second = stats.snapshot();

        assert_eq!(first.iterations, 1);
        assert_eq!(second.iterations, 2);
    }
}
