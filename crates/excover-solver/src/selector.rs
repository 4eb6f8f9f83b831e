//! Greedy selection driver.
//!
//! One sequential driver alternates with a parallel scoring batch per
//! iteration: freeze coverage, score the remaining pool, pick the
//! minimum-cost candidate, apply it, repeat. Coverage is mutated only
//! here, between batches, so the scoring fan-out needs no locks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use excover_config::SolverConfig;
use excover_core::{
    CoverageState, ExcoverError, Problem, Result, Solution, SolveStatus,
};

use crate::event::{EventSupport, SelectionEvent, SolverEventListener};
use crate::scorer::ParallelScorer;
use crate::stats::StatsCollector;

/// Cloneable handle for requesting cooperative early termination.
///
/// The driver checks the flag between iterations, never mid-batch;
/// in-flight scoring work is allowed to finish.
#[derive(Clone, Debug)]
pub struct TerminationHandle {
    flag: Arc<AtomicBool>,
}

impl TerminationHandle {
    /// Requests termination at the next iteration boundary.
    ///
    /// Thread-safe; may be called from another thread while the
    /// driver is solving.
    pub fn terminate_early(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once termination has been requested.
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The greedy set cover solver.
///
/// Owns the problem, the coverage state and the growing solution.
/// Each iteration scores every remaining candidate in parallel against
/// a frozen coverage snapshot, selects the cheapest (ties broken by
/// earliest input order), and unions the winner's members into the
/// live coverage. The loop ends in one of three terminal states:
/// [`SolveStatus::Covered`], [`SolveStatus::BudgetExhausted`] or
/// [`SolveStatus::PoolExhausted`].
///
/// # Examples
///
/// ```
/// use excover_core::{Problem, SolveStatus};
/// use excover_solver::GreedySelector;
///
/// let problem = Problem::builder()
///     .with_set("S1", ["a", "b"], Vec::<String>::new())
///     .with_set("S2", ["a"], ["x"])
///     .build()
///     .unwrap();
///
/// let mut solver = GreedySelector::new(problem);
/// let status = solver.solve().unwrap();
///
/// assert_eq!(status, SolveStatus::Covered);
/// assert_eq!(solver.solution().len(), 1);
/// assert_eq!(solver.solution().selections()[0].id.as_str(), "S1");
/// ```
#[derive(Debug)]
pub struct GreedySelector {
    problem: Problem,
    scorer: ParallelScorer,
    coverage: CoverageState,
    solution: Solution,
    selected: Vec<bool>,
    limit: Option<u64>,
    status: SolveStatus,
    events: EventSupport,
    stats: Arc<StatsCollector>,
    terminate_early: Arc<AtomicBool>,
}

impl GreedySelector {
    /// Creates a solver with default settings: unbounded budget,
    /// scoring on the global thread pool.
    pub fn new(problem: Problem) -> Self {
        let pool_size = problem.candidates().len();
        GreedySelector {
            problem,
            scorer: ParallelScorer::default(),
            coverage: CoverageState::new(),
            solution: Solution::new(),
            selected: vec![false; pool_size],
            limit: None,
            status: SolveStatus::Running,
            events: EventSupport::new(),
            stats: Arc::new(StatsCollector::new()),
            terminate_early: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a solver from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExcoverError::Configuration`] when the configuration
    /// fails validation or the scoring pool cannot be built.
    pub fn with_config(problem: Problem, config: &SolverConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ExcoverError::Configuration(e.to_string()))?;
        let mut solver = GreedySelector::new(problem);
        solver.scorer = ParallelScorer::new(config.score_thread_count.clone())?;
        solver.limit = config.selection_limit;
        Ok(solver)
    }

    /// Sets the selection budget.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Registers a lifecycle listener.
    pub fn add_listener(&mut self, listener: Arc<dyn SolverEventListener>) {
        self.events.add_listener(listener);
    }

    /// Returns a handle for cooperative early termination.
    pub fn termination_handle(&self) -> TerminationHandle {
        TerminationHandle {
            flag: self.terminate_early.clone(),
        }
    }

    /// Runs the greedy loop to a terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`ExcoverError::IncompleteUniverse`] when some declared
    /// include-universe element is unreachable from the pool. This is
    /// checked once, before the first iteration. Pool exhaustion is
    /// not an error; it surfaces as [`SolveStatus::PoolExhausted`]
    /// with the partial solution retained.
    pub fn solve(&mut self) -> Result<SolveStatus> {
        self.problem.verify_universe_reachable()?;
        self.status = SolveStatus::Running;
        self.stats
            .set_pool_remaining(self.pool_remaining() as u64);
        tracing::info!(
            candidates = self.problem.candidates().len(),
            include_universe = self.problem.include_universe().len(),
            exclude_universe = self.problem.exclude_universe().len(),
            limit = ?self.limit,
            "solving exclusion cover problem"
        );
        self.events.fire_solving_started(&self.problem);

        let mut terminated_early = false;
        loop {
            if self.is_covered() {
                self.status = SolveStatus::Covered;
                break;
            }
            if let Some(limit) = self.limit {
                if self.solution.len() as u64 >= limit {
                    self.status = SolveStatus::BudgetExhausted;
                    break;
                }
            }
            if self.terminate_early.load(Ordering::SeqCst) {
                terminated_early = true;
                self.status = SolveStatus::BudgetExhausted;
                break;
            }

            let remaining = self.pool_remaining();
            if remaining == 0 {
                tracing::warn!("candidate pool exhausted before full coverage");
                self.status = SolveStatus::PoolExhausted;
                break;
            }

            tracing::debug!(remaining, "scoring batch");
            let scored =
                self.scorer
                    .score_batch(self.problem.candidates(), &self.selected, &self.coverage);
            self.stats.record_batch(scored.len() as u64);

            // Minimum over (cost, input order): deterministic for any
            // worker count since both components are total orders.
            let Some(best) = scored
                .into_iter()
                .min_by_key(|s| (s.breakdown.cost, s.pool_index))
            else {
                self.status = SolveStatus::PoolExhausted;
                break;
            };

            if best.breakdown.cost.is_infinite() {
                // Every remaining candidate adds zero include coverage;
                // selecting one would never progress toward the universe.
                tracing::warn!(
                    remaining,
                    "no remaining candidate adds include coverage"
                );
                self.status = SolveStatus::PoolExhausted;
                break;
            }

            // Newly covered elements are computed against the live
            // coverage, not the batch snapshot.
            let candidate = &self.problem.candidates()[best.pool_index];
            let (new_include, new_exclude) = self.coverage.absorb(candidate);
            self.selected[best.pool_index] = true;
            self.solution.push(best.id.clone(), best.breakdown.cost);

            let pool_remaining = remaining - 1;
            self.stats
                .record_selection(new_include as u64, new_exclude as u64, pool_remaining as u64);
            tracing::debug!(
                id = %best.id,
                cost = %best.breakdown.cost,
                new_include,
                new_exclude,
                "candidate selected"
            );
            self.events.fire_selection(&SelectionEvent {
                iteration: self.solution.len() as u64,
                id: &best.id,
                breakdown: best.breakdown,
                include_covered: self.coverage.include_covered().len(),
                exclude_covered: self.coverage.exclude_covered().len(),
                pool_remaining,
            });
        }

        tracing::info!(
            status = ?self.status,
            selections = self.solution.len(),
            include_covered = self.coverage.include_covered().len(),
            exclude_covered = self.coverage.exclude_covered().len(),
            "solve finished"
        );
        self.events.fire_solving_ended(self.status, terminated_early);
        Ok(self.status)
    }

    /// Sets the selection budget, then runs the greedy loop.
    pub fn solve_with_limit(&mut self, limit: u64) -> Result<SolveStatus> {
        self.limit = Some(limit);
        self.solve()
    }

    /// The problem being solved.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The accepted solution so far, in selection order.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// The current solve status.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// The live coverage state.
    pub fn coverage(&self) -> &CoverageState {
        &self.coverage
    }

    /// Number of candidates still eligible for selection.
    pub fn pool_remaining(&self) -> usize {
        self.selected.iter().filter(|s| !**s).count()
    }

    /// Shared counters for external progress reporters.
    pub fn stats(&self) -> Arc<StatsCollector> {
        self.stats.clone()
    }

    fn is_covered(&self) -> bool {
        self.problem
            .include_universe()
            .is_subset(self.coverage.include_covered())
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
