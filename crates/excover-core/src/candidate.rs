//! Candidate set record: one subset's identity and memberships.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Stable identifier of one candidate set.
///
/// A cheap-to-clone handle (`Arc<str>` internally) so scoring results
/// can carry identifiers across worker threads without copying the
/// underlying text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(Arc<str>);

impl SetId {
    /// Creates a new identifier from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        SetId(Arc::from(id.as_ref()))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SetId {
    fn from(s: &str) -> Self {
        SetId::new(s)
    }
}

impl From<String> for SetId {
    fn from(s: String) -> Self {
        SetId::new(s)
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetId({})", self.0)
    }
}

/// One candidate subset: its identity and the elements it would
/// contribute to the include and exclude universes.
///
/// Immutable after construction. A candidate with an empty include
/// contribution is valid; it scores infinite and is never selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    id: SetId,
    include_members: HashSet<String>,
    exclude_members: HashSet<String>,
}

impl CandidateSet {
    /// Creates a candidate from its identifier and member collections.
    ///
    /// Duplicate members within one collection collapse into the set.
    pub fn new<I, E>(id: impl Into<SetId>, include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        CandidateSet {
            id: id.into(),
            include_members: include.into_iter().map(Into::into).collect(),
            exclude_members: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the candidate's identifier.
    pub fn id(&self) -> &SetId {
        &self.id
    }

    /// Elements this candidate contributes toward the include universe.
    pub fn include_members(&self) -> &HashSet<String> {
        &self.include_members
    }

    /// Elements this candidate contributes toward the exclude universe.
    pub fn exclude_members(&self) -> &HashSet<String> {
        &self.exclude_members
    }
}
