use std::sync::Arc;
use std::thread;

use anyhow::Context;
use minefield::{Indicator, Level, Lights, LogSwitch, MineDetector, Switch, Thresholds};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod audio;
mod constants;
mod walk;

use constants::{END_BLINK_FOR, END_BLINK_HZ, LIGHT_NAMES, SEED, STEP_INTERVAL, TONE_HZ};
use walk::{Field, Outcome};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Buzzer as a tone on the sound card, or only in the log without one
    let (_audio_stream, buzzer): (Option<cpal::Stream>, Arc<dyn Switch>) =
        match audio::start_tone(TONE_HZ) {
            Some((stream, tone)) => (Some(stream), Arc::new(tone) as Arc<dyn Switch>),
            None => {
                log::warn!("no audio output, buzzer goes to the log only");
                (None, Arc::new(LogSwitch::new("buzzer")) as Arc<dyn Switch>)
            }
        };
    let lights: Lights = LIGHT_NAMES.map(|name| Arc::new(LogSwitch::new(name)) as Arc<dyn Switch>);
    let detector = MineDetector::new(Thresholds::default(), lights, Indicator::new(buzzer));

    let mut rng = StdRng::seed_from_u64(SEED);
    let field = Field::generate(&mut rng);
    log::info!(
        "{} hazards, base at {:?}, goal at {:?}",
        field.hazards.len(),
        field.base.coords(),
        field.goal.coords()
    );

    detector.start().context("starting buzzer loop")?;
    let outcome = walk::walk(&field, &detector, STEP_INTERVAL);
    detector.stop();

    match outcome {
        Outcome::Tripped { at, steps } => {
            log::info!("BOOM!!! hazard triggered at {:?} after {steps} steps", at.coords());
            detector
                .blink(Level::MAX, END_BLINK_HZ)
                .context("starting end-of-walk blink")?;
            thread::sleep(END_BLINK_FOR);
            detector.blink_off();
        }
        Outcome::ReachedGoal { steps } => {
            log::info!("goal reached safely in {steps} steps");
            detector.off();
        }
    }
    Ok(())
}
