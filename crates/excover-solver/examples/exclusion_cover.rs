//! Solves a small exclusion cover problem with event logging enabled.
//!
//! Run with: `cargo run --example exclusion_cover`

use std::sync::Arc;

use excover_core::Problem;
use excover_solver::{GreedySelector, LoggingEventListener};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Drug-class style example: each candidate covers some target
    // population (include) but also matches an unwanted one (exclude).
    let problem = Problem::from_rows(vec![
        ("broad", vec!["p1", "p2", "p3", "p4"], vec!["q1", "q2"]),
        ("narrow-a", vec!["p1", "p2"], vec![]),
        ("narrow-b", vec!["p3", "p4"], vec!["q1"]),
        ("tail", vec!["p5"], vec![]),
    ])?;

    let mut solver = GreedySelector::new(problem);
    solver.add_listener(Arc::new(LoggingEventListener::new()));
    let status = solver.solve()?;

    println!("status: {status:?}");
    for (id, cost) in solver.solution().iter() {
        println!("  {id}  cost {cost}");
    }
    let stats = solver.stats().snapshot();
    println!(
        "covered {} include / {} exclude elements in {} iterations",
        stats.include_covered, stats.exclude_covered, stats.iterations
    );
    Ok(())
}
