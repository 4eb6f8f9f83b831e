//! Event system for solver monitoring.
//!
//! The driver fires events at defined points: solving started, one
//! candidate selected, solving ended. Listeners are injected by the
//! embedding application; the core performs no formatted output of its
//! own. All listener methods are called synchronously on the driver
//! thread, in registration order.

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use excover_core::{CostBreakdown, Problem, SetId, SolveStatus};

/// Details of one accepted selection, handed to listeners after the
/// coverage update of that iteration.
#[derive(Clone, Copy, Debug)]
pub struct SelectionEvent<'a> {
    /// 1-based iteration number; equals the solution length so far.
    pub iteration: u64,
    /// The selected candidate.
    pub id: &'a SetId,
    /// The marginal contribution the candidate was selected at.
    pub breakdown: CostBreakdown,
    /// Include elements covered after this selection.
    pub include_covered: usize,
    /// Exclude elements covered after this selection.
    pub exclude_covered: usize,
    /// Candidates still eligible for future iterations.
    pub pool_remaining: usize,
}

/// Listener for solver lifecycle events.
pub trait SolverEventListener: Send + Sync + Debug {
    /// Called after each accepted selection.
    fn on_selection(&self, event: &SelectionEvent<'_>);

    /// Called when solving starts, after the entry invariant check.
    fn on_solving_started(&self, _problem: &Problem) {}

    /// Called when solving reaches a terminal state.
    fn on_solving_ended(&self, _status: SolveStatus, _terminated_early: bool) {}
}

/// Central event broadcaster for the selection driver.
pub struct EventSupport {
    listeners: Vec<Arc<dyn SolverEventListener>>,
}

impl EventSupport {
    /// Creates a new event support instance.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener.
    pub fn add_listener(&mut self, listener: Arc<dyn SolverEventListener>) {
        self.listeners.push(listener);
    }

    /// Removes all listeners.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if any listener is registered.
    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Fires the solving started event.
    pub fn fire_solving_started(&self, problem: &Problem) {
        for listener in &self.listeners {
            listener.on_solving_started(problem);
        }
    }

    /// Fires the selection event.
    pub fn fire_selection(&self, event: &SelectionEvent<'_>) {
        for listener in &self.listeners {
            listener.on_selection(event);
        }
    }

    /// Fires the solving ended event.
    pub fn fire_solving_ended(&self, status: SolveStatus, terminated_early: bool) {
        for listener in &self.listeners {
            listener.on_solving_ended(status, terminated_early);
        }
    }
}

impl Default for EventSupport {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for EventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A listener that bridges solver events onto `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener;

impl LoggingEventListener {
    /// Creates a new logging listener.
    pub fn new() -> Self {
        Self
    }
}

impl SolverEventListener for LoggingEventListener {
    fn on_selection(&self, event: &SelectionEvent<'_>) {
        tracing::info!(
            iteration = event.iteration,
            id = %event.id,
            cost = %event.breakdown.cost,
            added_include = event.breakdown.added_include,
            added_exclude = event.breakdown.added_exclude,
            include_covered = event.include_covered,
            exclude_covered = event.exclude_covered,
            pool_remaining = event.pool_remaining,
            "candidate selected"
        );
    }

    fn on_solving_started(&self, problem: &Problem) {
        tracing::info!(
            candidates = problem.candidates().len(),
            include_universe = problem.include_universe().len(),
            exclude_universe = problem.exclude_universe().len(),
            "solving started"
        );
    }

    fn on_solving_ended(&self, status: SolveStatus, terminated_early: bool) {
        tracing::info!(?status, terminated_early, "solving ended");
    }
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    selection_count: AtomicUsize,
    solving_started_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
}

impl CountingEventListener {
    /// Creates a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of selection events.
    pub fn selection_count(&self) -> usize {
        self.selection_count.load(Ordering::SeqCst)
    }

    /// Returns the number of solving started events.
    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    /// Returns the number of solving ended events.
    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.selection_count.store(0, Ordering::SeqCst);
        self.solving_started_count.store(0, Ordering::SeqCst);
        self.solving_ended_count.store(0, Ordering::SeqCst);
    }
}

impl SolverEventListener for CountingEventListener {
    fn on_selection(&self, _event: &SelectionEvent<'_>) {
        self.selection_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _problem: &Problem) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _status: SolveStatus, _terminated_early: bool) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
