//! Mine detector core for the MineField game.
//!
//! Converts the distance to the nearest hidden mine into a level from 0 to 4
//! and renders it on four lights and a buzzer. Hardware and game world access
//! stay outside this crate: callers supply [`output::Switch`] devices and a
//! distance.

pub mod constants;
pub mod detector;
pub mod indicator;
pub mod level;
pub mod output;
pub mod point;

pub use constants::*;
pub use detector::*;
pub use indicator::{render_cycle, Indicator, IndicatorState, Pattern, SpawnError};
pub use level::*;
pub use output::*;
pub use point::*;
