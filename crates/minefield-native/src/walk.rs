//! Simulated walk across a hazard field, feeding the detector at each step.
//!
//! Stands in for the game world: hazards are scattered around a base, the
//! walker heads straight for the goal and the detector reports the distance
//! to the nearest hazard in the x+z plane.

use std::thread;
use std::time::Duration;

use glam::DVec3;
use minefield::{Axes, MineDetector, Point, Thresholds};
use rand::Rng;

use crate::constants::{
    BASE_EXTENT, GOAL_DISTANCE, HAZARD_CLEARANCE, HAZARD_COUNT, HAZARD_DEPTH, HAZARD_EXTENT,
    STEP_LENGTH, TRIGGER_DISTANCE,
};

#[derive(Clone, Debug)]
pub struct Field {
    pub base: Point,
    pub goal: Point,
    pub hazards: Vec<Point>,
}

impl Field {
    /// Random field with the default layout: base near the origin, goal at
    /// [`GOAL_DISTANCE`] in a random direction, no hazard within
    /// [`HAZARD_CLEARANCE`] of either.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let base = Point::new(
            rng.gen_range(-BASE_EXTENT..=BASE_EXTENT).round(),
            0.0,
            rng.gen_range(-BASE_EXTENT..=BASE_EXTENT).round(),
        );
        let azimuth = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);
        let heading = DVec3::new(azimuth.cos(), 0.0, azimuth.sin());
        let goal = Point::from(base.as_dvec3() + heading * GOAL_DISTANCE);
        let hazards = (0..HAZARD_COUNT)
            .map(|_| {
                Point::new(
                    base.x + rng.gen_range(-HAZARD_EXTENT..=HAZARD_EXTENT).round(),
                    HAZARD_DEPTH,
                    base.z + rng.gen_range(-HAZARD_EXTENT..=HAZARD_EXTENT).round(),
                )
            })
            .collect();
        let mut field = Self {
            base,
            goal,
            hazards,
        };
        field.clear_around(base, HAZARD_CLEARANCE);
        field.clear_around(goal, HAZARD_CLEARANCE);
        field
    }

    /// Drop hazards within `radius` of `point` in the x+z plane.
    /// Returns how many were removed.
    pub fn clear_around(&mut self, point: Point, radius: f64) -> usize {
        let before = self.hazards.len();
        self.hazards
            .retain(|h| point.distance_axes(h, Axes::XZ) > radius);
        let removed = before - self.hazards.len();
        log::debug!("{removed} hazards cleared around {:?}", point.coords());
        removed
    }

    pub fn nearest_hazard(&self, position: &Point) -> f64 {
        position.nearest_distance(&self.hazards, Axes::XZ)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Tripped { at: Point, steps: usize },
    ReachedGoal { steps: usize },
}

/// Walk from base to goal in straight steps, updating the detector each step
/// and pausing `interval` between steps.
pub fn walk(field: &Field, detector: &MineDetector, interval: Duration) -> Outcome {
    let start: DVec3 = field.base.into();
    let to_goal: DVec3 = DVec3::from(field.goal) - start;
    let total = to_goal.length();
    let dir = to_goal.normalize_or_zero();
    let steps = (total / STEP_LENGTH).ceil() as usize;

    for step in 0..=steps {
        let travelled = (step as f64 * STEP_LENGTH).min(total);
        let position = Point::from(start + dir * travelled);
        let distance = field.nearest_hazard(&position);
        let level = detector.on_value(distance);
        log::info!(
            "step {step:>3} at ({:>6.1}, {:>6.1}) nearest {distance:>5.1} {} level {level}",
            position.x,
            position.z,
            light_bar(detector.thresholds(), distance),
        );
        if distance <= TRIGGER_DISTANCE {
            return Outcome::Tripped { at: position, steps: step };
        }
        thread::sleep(interval);
    }
    Outcome::ReachedGoal { steps }
}

/// Text rendering of the four lights, e.g. `[B G . .]`.
pub fn light_bar(thresholds: &Thresholds, distance: f64) -> String {
    let marks = ['B', 'G', 'Y', 'R'];
    let lit = thresholds.lit(distance);
    let cells: Vec<String> = marks
        .iter()
        .zip(lit)
        .map(|(m, on)| if on { m.to_string() } else { ".".into() })
        .collect();
    format!("[{}]", cells.join(" "))
}
