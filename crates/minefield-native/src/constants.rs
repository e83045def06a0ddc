use std::time::Duration;

// Simulation settings for the desktop walk-through.

// Hazard field
pub const HAZARD_COUNT: usize = 200;
pub const HAZARD_EXTENT: f64 = 100.0; // hazards are scattered +/- this far from base in x and z
pub const HAZARD_DEPTH: f64 = -64.0; // buried at bedrock, only the x+z distance matters
pub const HAZARD_CLEARANCE: f64 = TRIGGER_DISTANCE + 1.0; // kept clear around base and goal
pub const BASE_EXTENT: f64 = 35.0; // base is placed +/- this far from the world origin
pub const GOAL_DISTANCE: f64 = 40.0;
pub const SEED: u64 = 42;

// Walking
pub const TRIGGER_DISTANCE: f64 = 1.0; // a hazard this close goes off
pub const STEP_LENGTH: f64 = 0.5;
pub const STEP_INTERVAL: Duration = Duration::from_millis(250);

// End of walk
pub const END_BLINK_HZ: f64 = 3.0;
pub const END_BLINK_FOR: Duration = Duration::from_secs(6);

// Buzzer tone
pub const TONE_HZ: f32 = 2_400.0; // close to a piezo buzzer's resonance
pub const TONE_AMPLITUDE: f32 = 0.25;
pub const TONE_SMOOTHING: f32 = 0.01; // per-sample approach towards the gate level, avoids clicks

pub const LIGHT_NAMES: [&str; 4] = ["blue", "green", "yellow", "red"];
