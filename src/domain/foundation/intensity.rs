//! Intensity value object - the caller's distress level on a 1-10 scale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Caller distress on a 1-10 scale.
///
/// Stored internally in tenths so the question-quality nudges (+0.5 / -0.3)
/// accumulate without rounding drift. All arithmetic clamps to the valid
/// range; a floor higher than 1 can be supplied for rules that never drop
/// the caller below a given level (e.g. "help is coming" floors at 3).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Intensity(i16);

const MIN_TENTHS: i16 = 10;
const MAX_TENTHS: i16 = 100;

impl Intensity {
    /// Lowest possible intensity (1).
    pub const MIN: Self = Self(MIN_TENTHS);

    /// Highest possible intensity (10).
    pub const MAX: Self = Self(MAX_TENTHS);

    /// Creates an intensity from an integer level, clamping to 1-10.
    pub fn new(level: u8) -> Self {
        Self((i16::from(level) * 10).clamp(MIN_TENTHS, MAX_TENTHS))
    }

    /// Creates an intensity from an integer level, rejecting out-of-range values.
    pub fn try_new(level: u8) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&level) {
            return Err(ValidationError::out_of_range(
                "intensity",
                1,
                10,
                i32::from(level),
            ));
        }
        Ok(Self(i16::from(level) * 10))
    }

    /// Returns the integer 1-10 level (rounded to nearest).
    pub fn level(&self) -> u8 {
        (((self.0 + 5) / 10) as u8).clamp(1, 10)
    }

    /// Returns the intensity as a fractional value between 1.0 and 10.0.
    pub fn as_f32(&self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// Decreases intensity by whole levels, never dropping below `floor`.
    pub fn decrease(&self, levels: u8, floor: u8) -> Self {
        let floor_tenths = (i16::from(floor) * 10).clamp(MIN_TENTHS, MAX_TENTHS);
        Self((self.0 - i16::from(levels) * 10).max(floor_tenths))
    }

    /// Increases intensity by whole levels, capped at 10.
    pub fn increase(&self, levels: u8) -> Self {
        Self((self.0 + i16::from(levels) * 10).min(MAX_TENTHS))
    }

    /// Nudges intensity by a number of tenths (positive or negative), clamped.
    pub fn nudge_tenths(&self, tenths: i16) -> Self {
        Self((self.0 + tenths).clamp(MIN_TENTHS, MAX_TENTHS))
    }

    pub(crate) fn tenths(&self) -> i16 {
        self.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.level())
    }
}
