// ---------------- Native buzzer (cpal) ----------------

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use minefield::Switch;

use crate::constants::{TONE_AMPLITUDE, TONE_SMOOTHING};

/// Buzzer rendered as a tone on the default output device.
///
/// Only the gate lives here so the buzzer can be shared with the detector
/// threads; the `cpal::Stream` that plays it is returned separately by
/// [`start_tone`] and must be kept alive by the caller.
#[derive(Clone)]
pub struct ToneBuzzer {
    gate: Arc<AtomicBool>,
}

impl Switch for ToneBuzzer {
    fn on(&self) {
        self.gate.store(true, Ordering::Relaxed);
    }
    fn off(&self) {
        self.gate.store(false, Ordering::Relaxed);
    }
}

struct Tone {
    gate: Arc<AtomicBool>,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    envelope: f32,
}

impl Tone {
    fn new(gate: Arc<AtomicBool>, frequency_hz: f32, sample_rate: f32) -> Self {
        Self {
            gate,
            phase: 0.0,
            phase_inc: 2.0 * std::f32::consts::PI * frequency_hz / sample_rate,
            envelope: 0.0,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let target = if self.gate.load(Ordering::Relaxed) {
            1.0
        } else {
            0.0
        };
        self.envelope += (target - self.envelope) * TONE_SMOOTHING;
        let raw = render_buzz_sample(self.phase);
        self.phase += self.phase_inc;
        if self.phase > 2.0 * std::f32::consts::PI {
            self.phase -= 2.0 * std::f32::consts::PI;
        }
        raw * self.envelope * TONE_AMPLITUDE
    }

    fn fill<T>(&mut self, data: &mut [T], channels: usize, convert: impl Fn(f32) -> T)
    where
        T: Copy,
    {
        for frame in data.chunks_mut(channels.max(1)) {
            let value = convert(self.next_sample());
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }
}

/// Soft square wave: harsher than a sine, closer to a piezo buzzer.
fn render_buzz_sample(phase: f32) -> f32 {
    (phase.sin() * 4.0).tanh()
}

/// Open the default output device and start a gated tone.
/// Returns `None` when no usable audio output is available.
pub fn start_tone(frequency_hz: f32) -> Option<(cpal::Stream, ToneBuzzer)> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let gate = Arc::new(AtomicBool::new(false));
    let tone = Tone::new(Arc::clone(&gate), frequency_hz, sample_rate);

    let err_fn = |err| log::error!("audio stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream_f32(&device, &config.into(), channels, tone, err_fn),
        cpal::SampleFormat::I16 => build_stream_i16(&device, &config.into(), channels, tone, err_fn),
        cpal::SampleFormat::U16 => build_stream_u16(&device, &config.into(), channels, tone, err_fn),
        other => {
            log::warn!("unsupported sample format {other:?}");
            return None;
        }
    }
    .map_err(|err| log::warn!("could not build audio stream: {err}"))
    .ok()?;

    stream.play().ok()?;
    log::info!("buzzer tone at {frequency_hz} Hz on {}", device.name().unwrap_or_default());
    Some((stream, ToneBuzzer { gate }))
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut tone: Tone,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [f32], _| tone.fill(data, channels, |s| s),
        err_fn,
        None,
    )
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut tone: Tone,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [i16], _| tone.fill(data, channels, |s| (s * i16::MAX as f32) as i16),
        err_fn,
        None,
    )
}

fn build_stream_u16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut tone: Tone,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [u16], _| {
            tone.fill(data, channels, |s| {
                ((s * 0.5 + 0.5).clamp(0.0, 1.0) * u16::MAX as f32) as u16
            })
        },
        err_fn,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_gate_is_silent() {
        let gate = Arc::new(AtomicBool::new(false));
        let mut tone = Tone::new(gate, 2_400.0, 48_000.0);
        let mut buf = [1.0f32; 256];
        tone.fill(&mut buf, 2, |s| s);
        assert!(buf.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn open_gate_ramps_up_within_amplitude() {
        let gate = Arc::new(AtomicBool::new(false));
        let buzzer = ToneBuzzer { gate: Arc::clone(&gate) };
        let mut tone = Tone::new(gate, 2_400.0, 48_000.0);
        buzzer.on();
        let mut buf = [0.0f32; 4096];
        tone.fill(&mut buf, 1, |s| s);
        let peak = buf.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.5 * TONE_AMPLITUDE);
        assert!(peak <= TONE_AMPLITUDE);
    }

    #[test]
    fn stereo_frames_carry_the_same_sample() {
        let gate = Arc::new(AtomicBool::new(true));
        let mut tone = Tone::new(gate, 2_400.0, 48_000.0);
        let mut buf = [0.0f32; 512];
        tone.fill(&mut buf, 2, |s| s);
        for frame in buf.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }
}
