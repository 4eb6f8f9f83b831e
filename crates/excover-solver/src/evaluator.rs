//! Marginal cost evaluation for one candidate.

use excover_core::{CandidateSet, Cost, CostBreakdown, CoverageSnapshot};

/// Computes a candidate's marginal contribution against a frozen
/// coverage snapshot.
///
/// Pure and stateless: the evaluation reads only the candidate record
/// and the snapshot, which is what makes it safe to fan out across
/// scoring workers.
pub struct CostEvaluator;

impl CostEvaluator {
    /// Evaluates one candidate against one snapshot.
    ///
    /// `added_include`/`added_exclude` are the candidate members not
    /// yet covered at snapshot time; the cost is their fixed-precision
    /// ratio, infinite when nothing new would be included.
    pub fn evaluate(candidate: &CandidateSet, snapshot: &CoverageSnapshot) -> CostBreakdown {
        let added_include = candidate
            .include_members()
            .iter()
            .filter(|e| !snapshot.include().contains(*e))
            .count();
        let added_exclude = candidate
            .exclude_members()
            .iter()
            .filter(|e| !snapshot.exclude().contains(*e))
            .count();
        CostBreakdown {
            added_include,
            added_exclude,
            cost: Cost::ratio(added_exclude, added_include),
        }
    }
}
