//! Background buzzer loop rendering a detector level as a count of beeps.
//!
//! A render cycle is always [`SLOTS_PER_CYCLE`] slots long. The first `level`
//! slots beep, the rest are silent for the same duration, so a listener hears
//! how many beeps fall in a fixed window rather than a changing cadence.
//!
//! The loop runs on its own thread and is controlled through atomics only:
//! the controller writes the level and the active flag, the loop reads them
//! once per cycle. Stopping is cooperative and takes effect at the next cycle
//! boundary.

use std::io;
use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{BUZZER_THREAD_NAME, PULSE_OFF, PULSE_ON, SLOTS_PER_CYCLE};
use crate::level::{Level, LevelError};
use crate::output::Switch;

#[derive(Debug, Error)]
#[error("failed to spawn {name} thread")]
pub struct SpawnError {
    pub name: &'static str,
    #[source]
    pub source: io::Error,
}

/// Timing of one active slot: a beep of `on` followed by `off` of silence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub on: Duration,
    pub off: Duration,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            on: PULSE_ON,
            off: PULSE_OFF,
        }
    }
}

impl Pattern {
    pub fn new(on: Duration, off: Duration) -> Self {
        Self { on, off }
    }

    /// Duration of a single slot, active or silent. Saturates at `Duration::MAX`.
    pub fn slot(&self) -> Duration {
        self.on.saturating_add(self.off)
    }

    /// Duration of a full render cycle, independent of the level.
    /// Saturates at `Duration::MAX`.
    pub fn cycle(&self) -> Duration {
        self.slot().saturating_mul(SLOTS_PER_CYCLE as u32)
    }
}

/// Render one cycle of `level` on `output`, blocking for [`Pattern::cycle`].
pub fn render_cycle(output: &dyn Switch, level: Level, pattern: &Pattern) {
    for slot in 0..SLOTS_PER_CYCLE {
        if slot < level.get() {
            output.on();
            thread::sleep(pattern.on);
            output.off();
            thread::sleep(pattern.off);
        } else {
            thread::sleep(pattern.slot());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Stopped,
    Running,
}

/// Start/stop bookkeeping shared between a controller and its background loop.
///
/// The active flag and the generation share one word: bit 0 is the flag, the
/// rest is the generation. Each successful start bumps the generation in the
/// same store that sets the flag, so a loop left over from before a stop/start
/// pair can never observe the new flag with its own generation.
#[derive(Debug, Default)]
pub(crate) struct LoopControl {
    state: AtomicU64,
    live: AtomicUsize,
}

const ACTIVE: u64 = 1;

impl LoopControl {
    /// Claim the running state. `None` if already active.
    pub(crate) fn begin(&self) -> Option<u64> {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            if current & ACTIVE != 0 {
                return None;
            }
            let generation = (current >> 1).wrapping_add(1);
            let next = (generation << 1) | ACTIVE;
            match self.state.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.live.fetch_add(1, Ordering::AcqRel);
                    return Some(generation);
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Undo a `begin` whose thread never started.
    pub(crate) fn abort(&self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
        self.state.fetch_and(!ACTIVE, Ordering::AcqRel);
    }

    /// Clear the active flag. Returns whether it was set.
    pub(crate) fn end(&self) -> bool {
        self.state.fetch_and(!ACTIVE, Ordering::AcqRel) & ACTIVE != 0
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state.load(Ordering::Acquire) & ACTIVE != 0
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.state.load(Ordering::Acquire) == (generation << 1) | ACTIVE
    }

    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Called by the loop thread on exit, including unwinding.
    pub(crate) fn exited(&self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Decrements the live-loop count when a loop thread finishes.
pub(crate) struct LiveGuard<'a>(pub(crate) &'a LoopControl);

impl Drop for LiveGuard<'_> {
    fn drop(&mut self) {
        self.0.exited();
    }
}

#[derive(Debug, Default)]
struct Shared {
    level: AtomicU8,
    control: LoopControl,
}

impl Shared {
    fn level(&self) -> Level {
        Level::from_raw(self.level.load(Ordering::Relaxed))
    }
}

/// Buzzer that beeps the current level in a background loop.
pub struct Indicator {
    output: Arc<dyn Switch>,
    pattern: Pattern,
    shared: Arc<Shared>,
}

impl Indicator {
    pub fn new(output: Arc<dyn Switch>) -> Self {
        Self::with_pattern(output, Pattern::default())
    }

    pub fn with_pattern(output: Arc<dyn Switch>, pattern: Pattern) -> Self {
        Self {
            output,
            pattern,
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn level(&self) -> Level {
        self.shared.level()
    }

    /// Set an already validated level. Picked up at the next cycle.
    pub fn set(&self, level: Level) {
        self.shared.level.store(level.get(), Ordering::Relaxed);
    }

    /// Validate and set the level.
    ///
    /// Accepts anything convertible to [`Level`]: integers must be in 0..=4,
    /// floats must additionally be integral.
    pub fn set_level<L>(&self, level: L) -> Result<(), LevelError>
    where
        L: TryInto<Level>,
        LevelError: From<L::Error>,
    {
        let level = level.try_into()?;
        self.set(level);
        Ok(())
    }

    pub fn state(&self) -> IndicatorState {
        if self.shared.control.is_active() {
            IndicatorState::Running
        } else {
            IndicatorState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == IndicatorState::Running
    }

    /// Number of render threads still alive. A stopped loop stays counted
    /// until it has finished its last cycle.
    pub fn running_loops(&self) -> usize {
        self.shared.control.live()
    }

    /// Launch the render loop in the background. No-op if already running.
    pub fn start(&self) -> Result<(), SpawnError> {
        let Some(generation) = self.shared.control.begin() else {
            return Ok(());
        };
        let shared = Arc::clone(&self.shared);
        let output = Arc::clone(&self.output);
        let pattern = self.pattern;
        let spawned = thread::Builder::new()
            .name(BUZZER_THREAD_NAME.into())
            .spawn(move || run(&shared, output.as_ref(), &pattern, generation));
        match spawned {
            Ok(_) => {
                log::info!("buzzer loop started (generation {generation})");
                Ok(())
            }
            Err(source) => {
                self.shared.control.abort();
                Err(SpawnError {
                    name: BUZZER_THREAD_NAME,
                    source,
                })
            }
        }
    }

    /// Ask the loop to stop after its current cycle. Does not wait.
    pub fn stop(&self) {
        if self.shared.control.end() {
            log::info!("buzzer loop stopping");
        }
    }
}

impl Drop for Indicator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(shared: &Shared, output: &dyn Switch, pattern: &Pattern, generation: u64) {
    let _live = LiveGuard(&shared.control);
    while shared.control.is_current(generation) {
        render_cycle(output, shared.level(), pattern);
    }
    log::debug!("buzzer loop {generation} exited");
}
