//! Coverage tracking for one solve.
//!
//! `CoverageState` is owned and mutated only by the selection driver,
//! sequentially between scoring batches. Workers never see it; they
//! read a `CoverageSnapshot` frozen at the start of their batch.

use std::collections::HashSet;
use std::sync::Arc;

use crate::candidate::CandidateSet;

/// Mutable record of which include and exclude elements the accepted
/// solution covers so far. Both sets grow monotonically; elements are
/// only ever added.
#[derive(Debug, Default)]
pub struct CoverageState {
    include_covered: HashSet<String>,
    exclude_covered: HashSet<String>,
}

impl CoverageState {
    /// Creates empty coverage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include elements covered so far.
    pub fn include_covered(&self) -> &HashSet<String> {
        &self.include_covered
    }

    /// Exclude elements covered so far.
    pub fn exclude_covered(&self) -> &HashSet<String> {
        &self.exclude_covered
    }

    /// Freezes the current coverage into an immutable snapshot.
    ///
    /// Every scoring worker of one batch reads the same snapshot, so a
    /// batch never observes a partial update.
    pub fn snapshot(&self) -> CoverageSnapshot {
        CoverageSnapshot {
            include: Arc::new(self.include_covered.clone()),
            exclude: Arc::new(self.exclude_covered.clone()),
        }
    }

    /// Unions a selected candidate's members into the live coverage.
    ///
    /// Computed against the current state, not a snapshot, so coverage
    /// stays exact even though scoring saw a frozen copy. Returns the
    /// number of newly covered (include, exclude) elements.
    pub fn absorb(&mut self, candidate: &CandidateSet) -> (usize, usize) {
        let before_include = self.include_covered.len();
        let before_exclude = self.exclude_covered.len();
        self.include_covered
            .extend(candidate.include_members().iter().cloned());
        self.exclude_covered
            .extend(candidate.exclude_members().iter().cloned());
        (
            self.include_covered.len() - before_include,
            self.exclude_covered.len() - before_exclude,
        )
    }
}

/// Immutable, reference-counted view of coverage at one point in time.
///
/// Cloning shares the underlying sets; handing one to N workers costs
/// two `Arc` bumps per worker.
#[derive(Clone, Debug)]
pub struct CoverageSnapshot {
    include: Arc<HashSet<String>>,
    exclude: Arc<HashSet<String>>,
}

impl CoverageSnapshot {
    /// Include elements covered at snapshot time.
    pub fn include(&self) -> &HashSet<String> {
        &self.include
    }

    /// Exclude elements covered at snapshot time.
    pub fn exclude(&self) -> &HashSet<String> {
        &self.exclude
    }
}
