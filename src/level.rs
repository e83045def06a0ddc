//! Proximity levels and the threshold mapping from distance to level.

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

use crate::constants::{
    DEFAULT_THRESH_BLUE, DEFAULT_THRESH_GREEN, DEFAULT_THRESH_RED, DEFAULT_THRESH_YELLOW,
};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LevelError {
    #[error("level must be an integer, got {0}")]
    NotInteger(f64),
    /// Wide enough to carry any `i64` or `u64` input unchanged.
    #[error("level must be between 0 and 4, got {0}")]
    OutOfRange(i128),
}

impl From<Infallible> for LevelError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Detector level: how many proximity thresholds a distance satisfies (0 to 4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const OFF: Level = Level(0);
    pub const MAX: Level = Level(4);

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Caller guarantees `raw <= 4`.
    pub(crate) const fn from_raw(raw: u8) -> Self {
        Level(raw)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl Level {
    fn from_wide(value: i128) -> Result<Self, LevelError> {
        if (0..=Level::MAX.0 as i128).contains(&value) {
            Ok(Level(value as u8))
        } else {
            Err(LevelError::OutOfRange(value))
        }
    }
}

macro_rules! level_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Level {
                type Error = LevelError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    Level::from_wide(value as i128)
                }
            }
        )*
    };
}

level_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TryFrom<f64> for Level {
    type Error = LevelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(LevelError::NotInteger(value));
        }
        if value < 0.0 || value > Level::MAX.0 as f64 {
            // saturating cast is fine, the value is already known to be out of range
            return Err(LevelError::OutOfRange(value as i128));
        }
        Ok(Level(value as u8))
    }
}

impl TryFrom<f32> for Level {
    type Error = LevelError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Level::try_from(value as f64)
    }
}

/// Count of thresholds that `distance` is within (inclusive).
///
/// Thresholds are conventionally ordered from least to most restrictive
/// (`t1 >= t2 >= t3 >= t4` as distances) but no ordering is enforced; each one
/// is checked on its own. A NaN distance satisfies none of them.
pub fn level_for(distance: f64, t1: f64, t2: f64, t3: f64, t4: f64) -> Level {
    let met = [t1, t2, t3, t4]
        .iter()
        .filter(|&&threshold| distance <= threshold)
        .count();
    Level::from_raw(met as u8)
}

/// The four detector thresholds, one per light colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub blue: f64,
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            blue: DEFAULT_THRESH_BLUE,
            green: DEFAULT_THRESH_GREEN,
            yellow: DEFAULT_THRESH_YELLOW,
            red: DEFAULT_THRESH_RED,
        }
    }
}

impl Thresholds {
    pub fn new(blue: f64, green: f64, yellow: f64, red: f64) -> Self {
        Self {
            blue,
            green,
            yellow,
            red,
        }
    }

    pub fn level_for(&self, distance: f64) -> Level {
        level_for(distance, self.blue, self.green, self.yellow, self.red)
    }

    /// Per light (blue, green, yellow, red): whether `distance` is within that
    /// light's own threshold.
    pub fn lit(&self, distance: f64) -> [bool; 4] {
        [
            distance <= self.blue,
            distance <= self.green,
            distance <= self.yellow,
            distance <= self.red,
        ]
    }
}
