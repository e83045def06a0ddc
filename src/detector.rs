//! The mine detector panel: four coloured lights plus the buzzer loop.
//!
//! Lights are blue, green, yellow and red, from the widest to the tightest
//! threshold. Each light follows its own threshold; the buzzer beeps the
//! number of thresholds met.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::constants::{BLINK_THREAD_NAME, DEFAULT_BLINK_HZ, MAX_BLINK_HALF_PERIOD};
use crate::indicator::{Indicator, LiveGuard, LoopControl, SpawnError};
use crate::level::{Level, Thresholds};
use crate::output::Switch;

/// Lights in panel order: blue, green, yellow, red.
pub type Lights = [Arc<dyn Switch>; 4];

struct Panel {
    thresholds: Thresholds,
    lights: Lights,
    buzzer: Indicator,
}

impl Panel {
    fn on_value(&self, distance: f64) -> Level {
        for (light, lit) in self.lights.iter().zip(self.thresholds.lit(distance)) {
            light.set(lit);
        }
        let level = self.thresholds.level_for(distance);
        self.buzzer.set(level);
        level
    }

    fn show(&self, level: Level) {
        for (i, light) in self.lights.iter().enumerate() {
            light.set(i < level.get() as usize);
        }
        self.buzzer.set(level);
    }

    fn off(&self) {
        for light in &self.lights {
            light.off();
        }
        self.buzzer.set(Level::OFF);
    }
}

pub struct MineDetector {
    panel: Arc<Panel>,
    blink: Arc<LoopControl>,
}

impl MineDetector {
    pub fn new(thresholds: Thresholds, lights: Lights, buzzer: Indicator) -> Self {
        Self {
            panel: Arc::new(Panel {
                thresholds,
                lights,
                buzzer,
            }),
            blink: Arc::new(LoopControl::default()),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.panel.thresholds
    }

    pub fn buzzer(&self) -> &Indicator {
        &self.panel.buzzer
    }

    /// Current buzzer level.
    pub fn level(&self) -> Level {
        self.panel.buzzer.level()
    }

    pub fn start(&self) -> Result<(), SpawnError> {
        self.panel.buzzer.start()
    }

    pub fn stop(&self) {
        self.panel.buzzer.stop();
    }

    /// Update lights and buzzer for a distance to the nearest hazard.
    pub fn on_value(&self, distance: f64) -> Level {
        self.panel.on_value(distance)
    }

    /// Light the first `level` lights and set the buzzer to `level`.
    pub fn show(&self, level: Level) {
        self.panel.show(level);
    }

    /// All lights off and the buzzer silent. The buzzer loop keeps running.
    pub fn off(&self) {
        self.panel.off();
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_active()
    }

    /// Alternate between showing `level` and all off, `frequency_hz` times a
    /// second, on a background thread. No-op if already blinking.
    pub fn blink(&self, level: Level, frequency_hz: f64) -> Result<(), SpawnError> {
        let Some(generation) = self.blink.begin() else {
            return Ok(());
        };
        let panel = Arc::clone(&self.panel);
        let control = Arc::clone(&self.blink);
        let half = half_period(frequency_hz);
        let spawned = thread::Builder::new()
            .name(BLINK_THREAD_NAME.into())
            .spawn(move || {
                let _live = LiveGuard(&control);
                while control.is_current(generation) {
                    panel.show(level);
                    thread::sleep(half);
                    panel.off();
                    thread::sleep(half);
                }
            });
        match spawned {
            Ok(_) => {
                log::info!("blinking level {level} every {half:?}");
                Ok(())
            }
            Err(source) => {
                self.blink.abort();
                Err(SpawnError {
                    name: BLINK_THREAD_NAME,
                    source,
                })
            }
        }
    }

    /// [`MineDetector::blink`] with the level a distance maps to.
    pub fn blink_value(&self, distance: f64, frequency_hz: f64) -> Result<(), SpawnError> {
        self.blink(self.panel.thresholds.level_for(distance), frequency_hz)
    }

    /// Ask the blink thread to stop after its current on/off pair.
    pub fn blink_off(&self) {
        if self.blink.end() {
            log::info!("blinking stopping");
        }
    }

    /// Blink threads still alive.
    pub fn blinking_loops(&self) -> usize {
        self.blink.live()
    }
}

impl Drop for MineDetector {
    fn drop(&mut self) {
        self.blink_off();
        self.panel.buzzer.stop();
    }
}

/// Half of the blink period for `frequency_hz`, capped at
/// [`MAX_BLINK_HALF_PERIOD`]. Non-positive or non-finite frequencies use
/// [`DEFAULT_BLINK_HZ`].
pub(crate) fn half_period(frequency_hz: f64) -> Duration {
    let hz = if frequency_hz.is_finite() && frequency_hz > 0.0 {
        frequency_hz
    } else {
        log::warn!("blink frequency {frequency_hz} is not usable, using {DEFAULT_BLINK_HZ} Hz");
        DEFAULT_BLINK_HZ
    };
    Duration::try_from_secs_f64(0.5 / hz)
        .map(|d| d.min(MAX_BLINK_HALF_PERIOD))
        .unwrap_or(MAX_BLINK_HALF_PERIOD)
}
