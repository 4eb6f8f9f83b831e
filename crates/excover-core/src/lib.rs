//! Excover Core - Domain types for exclusion-aware greedy set cover
//!
//! This crate provides the data model shared by the solver:
//! - Candidate sets and their include/exclude memberships
//! - The assembled problem (pool + universes) and its validating builder
//! - Coverage state with immutable snapshots for parallel scoring
//! - The fixed-precision selection cost
//! - The ordered solution and terminal solve status

pub mod candidate;
pub mod cost;
pub mod coverage;
pub mod error;
pub mod problem;
pub mod solution;

pub use candidate::{CandidateSet, SetId};
pub use cost::{Cost, CostBreakdown};
pub use coverage::{CoverageSnapshot, CoverageState};
pub use error::{ExcoverError, Result};
pub use problem::{Problem, ProblemBuilder};
pub use solution::{Selection, Solution, SolveStatus};
