//! Fixed-precision selection cost with i64 ×100000 scaling
//!
//! The greedy loop compares candidates by the ratio of newly covered
//! exclude elements to newly covered include elements. Internal values
//! are scaled by 100000 to provide 5 decimal places of precision, so
//! equality and tie-break comparisons are exact and reproducible across
//! runs and worker counts. Floating point never enters a comparison.

use std::fmt;
use std::ops::Add;

/// Scale factor for 5 decimal places of precision.
const SCALE: i64 = 100_000;

/// Sentinel for a candidate that contributes no new include elements.
const INFINITE: i64 = i64::MAX;

/// The cost ratio of selecting one candidate, as an i64 with ×100000 scaling.
///
/// `Cost` has a total order: every finite value compares by its scaled
/// ratio, and [`Cost::INFINITE`] sorts after all finite values. Division
/// by zero is defined away at construction time, never an arithmetic
/// fault.
///
/// # Examples
///
/// ```
/// use excover_core::Cost;
///
/// // 1 new exclude element per 2 new include elements
/// let cost = Cost::ratio(1, 2);
/// assert_eq!(cost.scaled(), 50_000);
/// assert_eq!(format!("{}", cost), "0.5");
///
/// // No new include elements: infinite, never an error
/// assert!(Cost::ratio(3, 0).is_infinite());
/// assert!(Cost::ratio(3, 0) > Cost::ratio(1_000_000, 1));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost(i64);

impl Cost {
    /// The zero cost: new include coverage with no exclude penalty.
    pub const ZERO: Cost = Cost(0);

    /// The infinite cost: no new include coverage at all.
    pub const INFINITE: Cost = Cost(INFINITE);

    /// Creates a cost from an unscaled integer ratio.
    ///
    /// The value is multiplied by 100000.
    #[inline]
    pub const fn of(units: i64) -> Self {
        Cost(units * SCALE)
    }

    /// Creates a cost from a pre-scaled value.
    #[inline]
    pub const fn of_scaled(scaled: i64) -> Self {
        Cost(scaled)
    }

    /// Computes the selection cost ratio `added_exclude / added_include`.
    ///
    /// Rounded half-up at the 5th decimal digit. A candidate that adds
    /// nothing to the include universe costs [`Cost::INFINITE`].
    pub fn ratio(added_exclude: usize, added_include: usize) -> Self {
        if added_include == 0 {
            return Cost::INFINITE;
        }
        let num = added_exclude as i64 * SCALE;
        let den = added_include as i64;
        Cost((num + den / 2) / den)
    }

    /// Returns the scaled value. [`Cost::INFINITE`] is `i64::MAX`.
    #[inline]
    pub const fn scaled(&self) -> i64 {
        self.0
    }

    /// Returns true for the infinite cost.
    #[inline]
    pub const fn is_infinite(&self) -> bool {
        self.0 == INFINITE
    }

    /// Returns true for any finite cost.
    #[inline]
    pub const fn is_finite(&self) -> bool {
        self.0 != INFINITE
    }

    /// Returns the ratio as an f64, `f64::INFINITY` for the sentinel.
    ///
    /// For display and reporting only; comparisons must use the scaled
    /// integer representation.
    pub fn value(&self) -> f64 {
        if self.is_infinite() {
            f64::INFINITY
        } else {
            self.0 as f64 / SCALE as f64
        }
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        if self.is_infinite() || other.is_infinite() {
            Cost::INFINITE
        } else {
            Cost(self.0 + other.0)
        }
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            write!(f, "Cost(inf)")
        } else {
            write!(f, "Cost({})", self)
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            return write!(f, "inf");
        }
        if self.0 % SCALE == 0 {
            // Integer value, no decimals needed
            return write!(f, "{}", self.0 / SCALE);
        }
        // Has decimal part - format with precision and strip trailing zeros
        let formatted = format!("{:.5}", self.0 as f64 / SCALE as f64);
        write!(f, "{}", formatted.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Per-candidate marginal contribution against one coverage snapshot.
///
/// `added_include` and `added_exclude` are the sizes of the set
/// differences between the candidate's members and the snapshot;
/// `cost` is their fixed-precision ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostBreakdown {
    /// Include elements this candidate would newly cover.
    pub added_include: usize,
    /// Exclude elements this candidate would newly cover.
    pub added_exclude: usize,
    /// The resulting selection cost.
    pub cost: Cost,
}
