//! Test helpers and fixtures for ducker integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `GAIN_EPSILON` (1e-9): Slack for per-sample monotonicity on `f64` gain
//! - `CONVERGED_EPSILON` (1e-4): Distance from target that counts as settled

pub mod tolerances;

use ducker::prelude::*;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: u32 = 48000;

/// Standard buffer size for block-based tests
pub const TEST_BUFFER_SIZE: usize = 512;

pub fn mono_source(samples: Vec<f32>) -> BufferSource {
    BufferSource::new(samples, SampleFormat::mono(TEST_SAMPLE_RATE))
}

pub fn stereo_source(samples: Vec<f32>) -> BufferSource {
    BufferSource::new(samples, SampleFormat::stereo(TEST_SAMPLE_RATE))
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Single full-scale sample followed by silence.
pub fn generate_impulse(num_samples: usize) -> Vec<f32> {
    let mut samples = generate_silence(num_samples);
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    samples
}

/// Constant level for `on` samples, then silence for `off` samples.
pub fn generate_burst(level: f32, on: usize, off: usize) -> Vec<f32> {
    let mut samples = vec![level; on];
    samples.extend(generate_silence(off));
    samples
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Per-sample view of processor state.
#[derive(Debug, Clone, Copy)]
pub struct Trace {
    pub gain: f64,
    pub target: f64,
    pub envelope: f64,
    pub hold: usize,
}

/// Process a mono processor one sample at a time and record its state.
pub fn trace<P, S>(processor: &mut DuckingProcessor<P, S>, num_samples: usize) -> Vec<Trace>
where
    P: SampleSource,
    S: SampleSource,
{
    let mut sample = [0.0f32; 1];
    let mut out = Vec::with_capacity(num_samples);

    for _ in 0..num_samples {
        if processor.read(&mut sample, 0, 1) == 0 {
            break;
        }
        out.push(Trace {
            gain: processor.current_gain(),
            target: processor.target_gain(),
            envelope: processor.envelope(),
            hold: processor.hold_remaining(),
        });
    }

    out
}

/// Pull `num_samples` from any source in blocks of [`TEST_BUFFER_SIZE`].
pub fn render<S: SampleSource>(source: &mut S, num_samples: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; num_samples];
    let mut done = 0;

    while done < num_samples {
        let n = source.read(&mut out, done, (num_samples - done).min(TEST_BUFFER_SIZE));
        if n == 0 {
            break;
        }
        done += n;
    }

    out.truncate(done);
    out
}

/// Check if two signals are approximately equal within tolerance.
pub fn signals_approx_equal(a: &[f32], b: &[f32], tolerance: f32) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}
