//! Tests for the greedy selection driver.

use std::sync::{Arc, Mutex};

use excover_config::{ScoreThreadCount, SolverConfig};
use excover_core::{Cost, ExcoverError, Problem, SolveStatus};

use crate::event::{CountingEventListener, SelectionEvent, SolverEventListener};

use super::*;

fn solution_ids(solver: &GreedySelector) -> Vec<String> {
    solver
        .solution()
        .iter()
        .map(|(id, _)| id.as_str().to_owned())
        .collect()
}

#[test]
fn test_single_set_covering_everything_wins() {
    // S1 covers both universe elements at zero exclude cost; the
    // cheaper-per-element alternatives never get a turn.
    let problem = Problem::builder()
        .with_set("S1", ["a", "b"], Vec::<String>::new())
        .with_set("S2", ["a"], ["x"])
        .with_set("S3", ["b"], Vec::<String>::new())
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem);
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::Covered);
    assert_eq!(solution_ids(&solver), vec!["S1"]);
    assert_eq!(solver.solution().selections()[0].cost, Cost::ZERO);
}

#[test]
fn test_ratio_beats_raw_exclude_count() {
    // S1: 2 exclude / 1 include = 2.0; S2: 1 exclude / 2 include = 0.5.
    let problem = Problem::builder()
        .with_set("S1", ["a"], ["x", "y"])
        .with_set("S2", ["a", "b"], ["x"])
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem);
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::Covered);
    assert_eq!(solution_ids(&solver), vec!["S2"]);
    assert_eq!(solver.solution().selections()[0].cost, Cost::ratio(1, 2));
}

#[test]
fn test_budget_limit_stops_before_coverage() {
    let problem = Problem::builder()
        .with_set("S1", ["a"], Vec::<String>::new())
        .with_set("S2", ["b"], Vec::<String>::new())
        .with_set("S3", ["c"], Vec::<String>::new())
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem).with_limit(2);
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::BudgetExhausted);
    assert_eq!(solver.solution().len(), 2);
    assert_eq!(solver.coverage().include_covered().len(), 2);
}

#[test]
fn test_zero_limit_selects_nothing() {
    let problem = Problem::builder()
        .with_set("S1", ["a"], Vec::<String>::new())
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem);
    let status = solver.solve_with_limit(0).unwrap();

    assert_eq!(status, SolveStatus::BudgetExhausted);
    assert!(solver.solution().is_empty());
}

#[test]
fn test_equal_costs_break_ties_by_input_order() {
    let problem = Problem::builder()
        .with_set("S1", ["a"], Vec::<String>::new())
        .with_set("S2", ["b"], Vec::<String>::new())
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem);
    solver.solve().unwrap();

    assert_eq!(solution_ids(&solver), vec!["S1", "S2"]);
}

#[test]
fn test_empty_include_candidate_never_selected() {
    let problem = Problem::builder()
        .with_set("S1", Vec::<String>::new(), ["q"])
        .with_set("S2", ["a"], ["x"])
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem);
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::Covered);
    assert_eq!(solution_ids(&solver), vec!["S2"]);
}

#[test]
fn test_incomplete_universe_fails_at_entry() {
    let problem = Problem::builder()
        .with_set("S1", ["a"], Vec::<String>::new())
        .with_include_universe(["a", "b"])
        .build()
        .unwrap();

    let mut solver = GreedySelector::new(problem);
    let err = solver.solve().unwrap_err();

    assert!(matches!(
        err,
        ExcoverError::IncompleteUniverse { missing } if missing == vec!["b".to_owned()]
    ));
    assert!(solver.solution().is_empty());
}

#[test]
fn test_identical_solutions_at_any_thread_count() {
    let rows = || {
        vec![
            ("S1", vec!["a", "b", "c"], vec!["x", "y"]),
            ("S2", vec!["a", "d"], vec!["x"]),
            ("S3", vec!["b", "e"], vec![]),
            ("S4", vec!["c", "d", "e"], vec!["z"]),
            ("S5", vec!["f"], vec!["x", "y", "z"]),
        ]
    };

    let mut reference: Option<Vec<(String, Cost)>> = None;
    for threads in [
        ScoreThreadCount::None,
        ScoreThreadCount::Count(1),
        ScoreThreadCount::Count(4),
        ScoreThreadCount::Auto,
    ] {
        let config = SolverConfig::new().with_score_thread_count(threads);
        let mut solver =
            GreedySelector::with_config(Problem::from_rows(rows()).unwrap(), &config).unwrap();
        solver.solve().unwrap();

        let sequence: Vec<(String, Cost)> = solver
            .solution()
            .iter()
            .map(|(id, cost)| (id.as_str().to_owned(), cost))
            .collect();
        match &reference {
            None => reference = Some(sequence),
            Some(expected) => assert_eq!(&sequence, expected),
        }
    }
}

#[test]
fn test_coverage_grows_monotonically() {
    #[derive(Debug, Default)]
    struct CoverageTracker {
        sizes: Mutex<Vec<(usize, usize)>>,
    }

    impl SolverEventListener for CoverageTracker {
        fn on_selection(&self, event: &SelectionEvent<'_>) {
            self.sizes
                .lock()
                .unwrap()
                .push((event.include_covered, event.exclude_covered));
        }
    }

    let tracker = Arc::new(CoverageTracker::default());
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a", "b"], vec!["x"]),
        ("S2", vec!["c"], vec!["x", "y"]),
        ("S3", vec!["d", "e"], vec![]),
    ])
    .unwrap();

    let mut solver = GreedySelector::new(problem);
    solver.add_listener(tracker.clone());
    solver.solve().unwrap();

    let sizes = tracker.sizes.lock().unwrap();
    assert!(!sizes.is_empty());
    for window in sizes.windows(2) {
        assert!(window[1].0 >= window[0].0);
        assert!(window[1].1 >= window[0].1);
    }
}

#[test]
fn test_terminates_within_pool_size_iterations() {
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a", "b"], Vec::<&str>::new()),
        ("S2", vec!["b", "c"], vec![]),
        ("S3", vec!["c", "d"], vec![]),
        ("S4", vec!["d", "a"], vec![]),
    ])
    .unwrap();
    let pool_size = problem.candidates().len() as u64;

    let mut solver = GreedySelector::new(problem);
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::Covered);
    assert!(solver.stats().iterations() <= pool_size);
}

#[test]
fn test_listener_sees_one_selection_per_accepted_set() {
    let listener = Arc::new(CountingEventListener::new());
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a"], Vec::<&str>::new()),
        ("S2", vec!["b"], vec![]),
    ])
    .unwrap();

    let mut solver = GreedySelector::new(problem);
    solver.add_listener(listener.clone());
    solver.solve().unwrap();

    assert_eq!(listener.solving_started_count(), 1);
    assert_eq!(listener.selection_count(), solver.solution().len());
    assert_eq!(listener.solving_ended_count(), 1);
}

#[test]
fn test_early_termination_stops_between_iterations() {
    #[derive(Debug, Default)]
    struct EndObserver {
        terminated_early: Mutex<Option<bool>>,
    }

    impl SolverEventListener for EndObserver {
        fn on_selection(&self, _event: &SelectionEvent<'_>) {}

        fn on_solving_ended(&self, _status: SolveStatus, terminated_early: bool) {
            *self.terminated_early.lock().unwrap() = Some(terminated_early);
        }
    }

    let observer = Arc::new(EndObserver::default());
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a"], Vec::<&str>::new()),
        ("S2", vec!["b"], vec![]),
    ])
    .unwrap();

    let mut solver = GreedySelector::new(problem);
    solver.add_listener(observer.clone());
    solver.termination_handle().terminate_early();
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::BudgetExhausted);
    assert!(solver.solution().is_empty());
    assert_eq!(*observer.terminated_early.lock().unwrap(), Some(true));
}

#[test]
fn test_raising_the_limit_resumes_a_partial_solve() {
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a"], Vec::<&str>::new()),
        ("S2", vec!["b"], vec![]),
        ("S3", vec!["c"], vec![]),
    ])
    .unwrap();

    let mut solver = GreedySelector::new(problem);
    assert_eq!(
        solver.solve_with_limit(1).unwrap(),
        SolveStatus::BudgetExhausted
    );
    assert_eq!(solver.solution().len(), 1);

    assert_eq!(solver.solve_with_limit(3).unwrap(), SolveStatus::Covered);
    assert_eq!(solution_ids(&solver), vec!["S1", "S2", "S3"]);
}

#[test]
fn test_stats_reflect_the_finished_solve() {
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a", "b"], vec!["x"]),
        ("S2", vec!["c"], vec![]),
    ])
    .unwrap();

    let mut solver = GreedySelector::new(problem);
    solver.solve().unwrap();

    let snapshot = solver.stats().snapshot();
    assert_eq!(snapshot.sets_selected, 2);
    assert_eq!(snapshot.iterations, 2);
    // First batch scores 2 candidates, second scores the remaining 1.
    assert_eq!(snapshot.candidates_scored, 3);
    assert_eq!(snapshot.include_covered, 3);
    assert_eq!(snapshot.exclude_covered, 1);
    assert_eq!(snapshot.pool_remaining, 0);
}

#[test]
fn test_invalid_config_rejected() {
    let problem = Problem::from_rows(vec![("S1", vec!["a"], Vec::<&str>::new())]).unwrap();
    let config = SolverConfig::new().with_score_thread_count(ScoreThreadCount::Count(0));

    assert!(matches!(
        GreedySelector::with_config(problem, &config),
        Err(ExcoverError::Configuration(_))
    ));
}

#[test]
fn test_config_selection_limit_applies() {
    let problem = Problem::from_rows(vec![
        ("S1", vec!["a"], Vec::<&str>::new()),
        ("S2", vec!["b"], vec![]),
    ])
    .unwrap();
    let config = SolverConfig::new().with_selection_limit(1);

    let mut solver = GreedySelector::with_config(problem, &config).unwrap();
    let status = solver.solve().unwrap();

    assert_eq!(status, SolveStatus::BudgetExhausted);
    assert_eq!(solver.solution().len(), 1);
}
