use std::time::Duration;

// Shared tuning constants for the detector panel and the buzzer loop.

// Buzzer pulse pattern
pub const PULSE_ON: Duration = Duration::from_millis(10); // audible beep
pub const PULSE_OFF: Duration = Duration::from_millis(190); // silence after each beep
pub const SLOTS_PER_CYCLE: u8 = 5; // slots per render cycle, one more than the max level

// Default proximity thresholds (game distance units, inclusive)
pub const DEFAULT_THRESH_BLUE: f64 = 16.0;
pub const DEFAULT_THRESH_GREEN: f64 = 8.0;
pub const DEFAULT_THRESH_YELLOW: f64 = 5.0;
pub const DEFAULT_THRESH_RED: f64 = 3.0;

// Blinking
pub const DEFAULT_BLINK_HZ: f64 = 3.0; // used when the caller passes a non-positive frequency
pub const MAX_BLINK_HALF_PERIOD: Duration = Duration::from_secs(60);

// Thread names
pub const BUZZER_THREAD_NAME: &str = "buzz-level";
pub const BLINK_THREAD_NAME: &str = "detector-blink";
