//! Scenario progress value object (0.0 to 1.0).

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far the call has progressed toward full information disclosure.
///
/// Always exactly `min(1.0, 0.15 * revealed_categories)`; constructed from
/// the revealed-category count rather than accumulated incrementally so the
/// invariant cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f32);

/// Progress contributed by each newly revealed detail category.
pub const STEP_PER_CATEGORY: f32 = 0.15;

impl Progress {
    /// No progress.
    pub const ZERO: Self = Self(0.0);

    /// Fully progressed.
    pub const COMPLETE: Self = Self(1.0);

    /// Computes progress from the number of revealed detail categories.
    pub fn from_revealed_count(count: usize) -> Self {
        Self((STEP_PER_CATEGORY * count as f32).min(1.0))
    }

    /// Returns the progress as a fraction between 0.0 and 1.0.
    pub fn as_fraction(&self) -> f32 {
        self.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_categories_is_zero_progress() {
        assert_eq!(Progress::from_revealed_count(0), Progress::ZERO);
    }

    #[test]
    fn each_category_adds_fifteen_percent() {
        assert!((Progress::from_revealed_count(1).as_fraction() - 0.15).abs() < f32::EPSILON);
        assert!((Progress::from_revealed_count(4).as_fraction() - 0.60).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_clamps_at_one() {
        assert_eq!(Progress::from_revealed_count(7), Progress::COMPLETE);
        assert_eq!(Progress::from_revealed_count(100), Progress::COMPLETE);
    }

    #[test]
    fn displays_as_percentage() {
        assert_eq!(format!("{}", Progress::from_revealed_count(2)), "30%");
    }
}
