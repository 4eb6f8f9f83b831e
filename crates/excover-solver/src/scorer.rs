//! Parallel scoring of the remaining candidate pool.
//!
//! One scoring batch is the unit of parallel work: freeze a coverage
//! snapshot, fan the evaluator out over every not-yet-selected
//! candidate, collect the full result list. Workers share only the
//! snapshot and the candidate records; no mutable state crosses the
//! fan-out, so the batch needs no locks and produces the same results
//! at any thread count.

use excover_config::ScoreThreadCount;
use excover_core::{CandidateSet, CostBreakdown, CoverageSnapshot, CoverageState};
use excover_core::{ExcoverError, Result, SetId};
use rayon::prelude::*;

use crate::evaluator::CostEvaluator;

/// One candidate's scoring result within a batch.
///
/// `pool_index` is the candidate's position in input order; the driver
/// uses it as the deterministic tie-break for equal costs.
#[derive(Clone, Debug)]
pub struct ScoredCandidate {
    pub pool_index: usize,
    pub id: SetId,
    pub breakdown: CostBreakdown,
}

enum ScoringMode {
    /// Rayon's global thread pool.
    Global,
    /// Plain sequential evaluation on the driver thread.
    Sequential,
    /// A dedicated pool with a fixed thread count.
    Dedicated(rayon::ThreadPool),
}

/// Fans [`CostEvaluator`] out over the remaining pool, one batch per
/// solver iteration.
pub struct ParallelScorer {
    mode: ScoringMode,
}

impl ParallelScorer {
    /// Creates a scorer for the given thread configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExcoverError::Configuration`] for a zero thread count
    /// or when the dedicated pool cannot be built.
    pub fn new(threads: ScoreThreadCount) -> Result<Self> {
        let mode = match threads {
            ScoreThreadCount::Auto => ScoringMode::Global,
            ScoreThreadCount::None => ScoringMode::Sequential,
            ScoreThreadCount::Count(0) => {
                return Err(ExcoverError::Configuration(
                    "score thread count must be at least 1".to_owned(),
                ));
            }
            ScoreThreadCount::Count(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ExcoverError::Configuration(e.to_string()))?;
                ScoringMode::Dedicated(pool)
            }
        };
        Ok(ParallelScorer { mode })
    }

    /// Scores every not-yet-selected candidate against the coverage as
    /// it stands right now.
    ///
    /// The snapshot is frozen once, before any worker starts, so all
    /// evaluations in the batch see identical coverage. Results keep
    /// pool order. An exhausted pool yields an empty list; the caller
    /// decides what that means.
    pub fn score_batch(
        &self,
        candidates: &[CandidateSet],
        selected: &[bool],
        coverage: &CoverageState,
    ) -> Vec<ScoredCandidate> {
        debug_assert_eq!(candidates.len(), selected.len());
        let snapshot = coverage.snapshot();
        match &self.mode {
            ScoringMode::Sequential => candidates
                .iter()
                .enumerate()
                .filter(|(i, _)| !selected[*i])
                .map(|(i, c)| score_one(i, c, &snapshot))
                .collect(),
            ScoringMode::Global => score_parallel(candidates, selected, &snapshot),
            ScoringMode::Dedicated(pool) => {
                pool.install(|| score_parallel(candidates, selected, &snapshot))
            }
        }
    }
}

impl Default for ParallelScorer {
    fn default() -> Self {
        ParallelScorer {
            mode: ScoringMode::Global,
        }
    }
}

impl std::fmt::Debug for ParallelScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.mode {
            ScoringMode::Global => "global".to_owned(),
            ScoringMode::Sequential => "sequential".to_owned(),
            ScoringMode::Dedicated(pool) => format!("dedicated({})", pool.current_num_threads()),
        };
        f.debug_struct("ParallelScorer").field("mode", &mode).finish()
    }
}

fn score_parallel(
    candidates: &[CandidateSet],
    selected: &[bool],
    snapshot: &CoverageSnapshot,
) -> Vec<ScoredCandidate> {
    candidates
        .par_iter()
        .enumerate()
        .filter(|(i, _)| !selected[*i])
        .map(|(i, c)| score_one(i, c, snapshot))
        .collect()
}

fn score_one(index: usize, candidate: &CandidateSet, snapshot: &CoverageSnapshot) -> ScoredCandidate {
    ScoredCandidate {
        pool_index: index,
        id: candidate.id().clone(),
        breakdown: CostEvaluator::evaluate(candidate, snapshot),
    }
}
