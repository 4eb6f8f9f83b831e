//! Problem construction and validation.
//!
//! `ProblemBuilder` is the boundary where raw rows become the typed
//! candidate pool. Malformed input is rejected here, not inside the
//! selection loop.

use std::collections::HashSet;

use crate::candidate::{CandidateSet, SetId};
use crate::error::{ExcoverError, Result};

/// An assembled set-cover problem: the candidate pool in input order
/// plus the include and exclude universes.
///
/// Input order matters: it is the stable tie-break order for equal-cost
/// candidates during selection.
#[derive(Clone, Debug)]
pub struct Problem {
    candidates: Vec<CandidateSet>,
    include_universe: HashSet<String>,
    exclude_universe: HashSet<String>,
}

impl Problem {
    /// Starts building a problem from rows.
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::new()
    }

    /// Builds a problem from an ordered collection of
    /// `(identifier, include_members, exclude_members)` rows.
    pub fn from_rows<S, I, E>(rows: impl IntoIterator<Item = (S, I, E)>) -> Result<Problem>
    where
        S: Into<SetId>,
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let mut builder = ProblemBuilder::new();
        for (id, include, exclude) in rows {
            builder = builder.with_set(id, include, exclude);
        }
        builder.build()
    }

    /// Builds a problem from three equal-length columns, the tabular
    /// ingestion shape. Row order follows column position.
    ///
    /// # Errors
    ///
    /// Returns [`ExcoverError::ColumnLengthMismatch`] when the columns
    /// disagree on length, instead of silently truncating to the
    /// shortest.
    pub fn from_columns<S, I, E>(
        ids: Vec<S>,
        include_columns: Vec<I>,
        exclude_columns: Vec<E>,
    ) -> Result<Problem>
    where
        S: Into<SetId>,
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        if ids.len() != include_columns.len() || ids.len() != exclude_columns.len() {
            return Err(ExcoverError::ColumnLengthMismatch {
                ids: ids.len(),
                includes: include_columns.len(),
                excludes: exclude_columns.len(),
            });
        }
        Problem::from_rows(
            ids.into_iter()
                .zip(include_columns)
                .zip(exclude_columns)
                .map(|((id, include), exclude)| (id, include, exclude)),
        )
    }

    /// The candidate pool in input order.
    pub fn candidates(&self) -> &[CandidateSet] {
        &self.candidates
    }

    /// The include universe: every element a complete solution covers.
    pub fn include_universe(&self) -> &HashSet<String> {
        &self.include_universe
    }

    /// The exclude universe: elements tracked as undesired coverage.
    pub fn exclude_universe(&self) -> &HashSet<String> {
        &self.exclude_universe
    }

    /// Checks that every include-universe element is contributed by at
    /// least one candidate.
    ///
    /// The solver runs this once at solve entry; callers that declare
    /// the universe explicitly may also call it eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ExcoverError::IncompleteUniverse`] listing the
    /// unreachable elements, sorted.
    pub fn verify_universe_reachable(&self) -> Result<()> {
        let reachable: HashSet<&String> = self
            .candidates
            .iter()
            .flat_map(|c| c.include_members())
            .collect();
        let mut missing: Vec<String> = self
            .include_universe
            .iter()
            .filter(|e| !reachable.contains(*e))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            missing.sort();
            Err(ExcoverError::IncompleteUniverse { missing })
        }
    }
}

/// Validating builder for [`Problem`].
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    candidates: Vec<CandidateSet>,
    declared_include_universe: Option<HashSet<String>>,
}

impl ProblemBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one candidate row. Row order is preserved.
    pub fn with_set<I, E>(mut self, id: impl Into<SetId>, include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        self.candidates.push(CandidateSet::new(id, include, exclude));
        self
    }

    /// Declares the include universe explicitly.
    ///
    /// Without this, the universe is derived as the union of all
    /// candidates' include members. A declared universe containing
    /// elements no candidate reaches fails at solve entry, not here.
    pub fn with_include_universe<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.declared_include_universe =
            Some(elements.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the rows and assembles the problem.
    ///
    /// # Errors
    ///
    /// Returns [`ExcoverError::DuplicateIdentifier`] naming the first
    /// identifier that appears twice.
    pub fn build(self) -> Result<Problem> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            if !seen.insert(candidate.id().as_str()) {
                return Err(ExcoverError::DuplicateIdentifier {
                    id: candidate.id().as_str().to_owned(),
                });
            }
        }

        let derived_include: HashSet<String> = self
            .candidates
            .iter()
            .flat_map(|c| c.include_members())
            .cloned()
            .collect();
        let exclude_universe: HashSet<String> = self
            .candidates
            .iter()
            .flat_map(|c| c.exclude_members())
            .cloned()
            .collect();

        Ok(Problem {
            candidates: self.candidates,
            include_universe: self.declared_include_universe.unwrap_or(derived_include),
            exclude_universe,
        })
    }
}
