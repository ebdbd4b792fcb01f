//! Sidechain ducking processor
//!
//! Pulls a frame from the program source and the matching frame from the
//! sidechain source, then per sample position:
//!
//! 1. peak-detects the sidechain across its channels,
//! 2. runs a one-pole envelope follower (attack coefficient while rising,
//!    release coefficient while falling),
//! 3. gates the envelope against the threshold, with a hold window that
//!    keeps ducking engaged after the level drops,
//! 4. smooths the applied gain toward the gate's target (attack coefficient
//!    while reducing, release coefficient while restoring),
//! 5. scales every program channel at that position.
//!
//! Smoothing state is kept in `f64` so slow release curves still reach unity.

use ducker_core::{Arc, DuckingMeter, Error, Result, SampleFormat, SampleSource};

use crate::config::DuckingConfig;
use crate::utils::{amplitude_to_db, db_to_amplitude, ms_to_samples, time_to_coeff};

/// Gain below which the processor reports itself as ducking.
const DUCKING_GAIN: f64 = 0.99;

/// Attenuates a program stream while a sidechain stream is loud.
///
/// ## Inputs
/// - `program`: audio to duck (e.g. music)
/// - `sidechain`: level detection signal (e.g. voice)
///
/// ## Output
/// - Program audio with the smoothed ducking gain applied, in the program's format
pub struct DuckingProcessor<P, S> {
    program: P,
    sidechain: S,
    config: Arc<DuckingConfig>,
    meter: Arc<DuckingMeter>,

    sample_rate: f64,
    sidechain_channels: usize,

    current_gain: f64,
    target_gain: f64,
    envelope: f64,
    hold_counter: usize,

    attack_coeff: f64,
    release_coeff: f64,
    threshold_linear: f64,
    reduction_linear: f64,
    hold_samples: usize,
    seen_version: Option<u64>,

    sidechain_buffer: Vec<f32>,
}

impl<P: SampleSource, S: SampleSource> DuckingProcessor<P, S> {
    /// Create a processor reading parameters from `config`.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if the two sources run at
    /// different sample rates. This is checked only here.
    pub fn new(program: P, sidechain: S, config: Arc<DuckingConfig>) -> Result<Self> {
        let program_format = program.format();
        let sidechain_format = sidechain.format();

        if program_format.sample_rate != sidechain_format.sample_rate {
            tracing::warn!(
                program = program_format.sample_rate,
                sidechain = sidechain_format.sample_rate,
                "sidechain sample rate does not match program"
            );
            return Err(Error::InvalidConfiguration(format!(
                "program runs at {} Hz but sidechain runs at {} Hz",
                program_format.sample_rate, sidechain_format.sample_rate
            )));
        }

        let mut processor = Self {
            program,
            sidechain,
            config,
            meter: Arc::new(DuckingMeter::new()),
            sample_rate: f64::from(program_format.sample_rate),
            sidechain_channels: sidechain_format.stride(),
            current_gain: 1.0,
            target_gain: 1.0,
            envelope: 0.0,
            hold_counter: 0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            threshold_linear: 1.0,
            reduction_linear: 1.0,
            hold_samples: 0,
            seen_version: None,
            sidechain_buffer: Vec::new(),
        };
        processor.sync_parameters();

        tracing::debug!(
            sample_rate = program_format.sample_rate,
            program_channels = program_format.channels,
            sidechain_channels = sidechain_format.channels,
            "created ducking processor"
        );

        Ok(processor)
    }

    /// Create a processor with its own default config.
    pub fn with_default_config(program: P, sidechain: S) -> Result<Self> {
        Self::new(program, sidechain, DuckingConfig::shared())
    }

    pub fn config(&self) -> &Arc<DuckingConfig> {
        &self.config
    }

    /// Swap the config, e.g. from a shared one to a private one.
    ///
    /// Smoothing state carries over; coefficients are rederived on the next frame.
    pub fn set_config(&mut self, config: Arc<DuckingConfig>) {
        self.config = config;
        self.seen_version = None;
        tracing::debug!("ducking processor switched config");
    }

    /// Lock-free meter for reading gain reduction from another thread.
    pub fn meter(&self) -> Arc<DuckingMeter> {
        Arc::clone(&self.meter)
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn sidechain(&self) -> &S {
        &self.sidechain
    }

    pub fn into_sources(self) -> (P, S) {
        (self.program, self.sidechain)
    }

    /// Pre-size the sidechain scratch buffer for requests of up to
    /// `program_samples` samples, so the audio thread does not allocate.
    pub fn reserve(&mut self, program_samples: usize) {
        let frames = program_samples.div_ceil(self.program.format().stride());
        let needed = frames * self.sidechain_channels;
        if self.sidechain_buffer.len() < needed {
            self.sidechain_buffer.resize(needed, 0.0);
        }
    }

    /// Return to the unducked state.
    pub fn reset(&mut self) {
        self.current_gain = 1.0;
        self.target_gain = 1.0;
        self.envelope = 0.0;
        self.hold_counter = 0;
        self.meter.reset();
    }

    pub fn current_gain(&self) -> f64 {
        self.current_gain
    }

    pub fn target_gain(&self) -> f64 {
        self.target_gain
    }

    pub fn envelope(&self) -> f64 {
        self.envelope
    }

    /// Samples left in the hold window.
    pub fn hold_remaining(&self) -> usize {
        self.hold_counter
    }

    pub fn attack_coeff(&self) -> f64 {
        self.attack_coeff
    }

    pub fn release_coeff(&self) -> f64 {
        self.release_coeff
    }

    /// Current gain in dB (0 when unducked, negative while ducking).
    pub fn gain_reduction_db(&self) -> f64 {
        amplitude_to_db(self.current_gain)
    }

    pub fn is_ducking(&self) -> bool {
        self.current_gain < DUCKING_GAIN
    }

    /// Re-read the config if it changed or the program's rate moved.
    #[inline]
    fn sync_parameters(&mut self) {
        let sample_rate = f64::from(self.program.format().sample_rate);
        let version = self.config.version();

        if self.seen_version == Some(version) && sample_rate == self.sample_rate {
            return;
        }

        // Version is read before the fields; a racing setter bumps it again
        // and the next frame re-reads.
        self.seen_version = Some(version);
        self.sample_rate = sample_rate;

        let config = &self.config;
        self.attack_coeff = time_to_coeff(config.attack_ms(), sample_rate);
        self.release_coeff = time_to_coeff(config.release_ms(), sample_rate);
        self.hold_samples = ms_to_samples(config.hold_ms(), sample_rate);
        self.threshold_linear = db_to_amplitude(f64::from(config.threshold_db()));
        self.reduction_linear = db_to_amplitude(f64::from(config.reduction_db()));
    }

    /// Advance the detector and smoother by one sample position.
    #[inline]
    fn process_position(&mut self, sidechain_peak: f64) -> f64 {
        let coeff = if sidechain_peak > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = coeff * self.envelope + (1.0 - coeff) * sidechain_peak;

        if self.envelope > self.threshold_linear {
            self.target_gain = self.reduction_linear;
            self.hold_counter = self.hold_samples;
        } else if self.hold_counter > 0 {
            self.hold_counter -= 1;
        } else {
            self.target_gain = 1.0;
        }

        let coeff = if self.current_gain < self.target_gain {
            self.release_coeff
        } else {
            self.attack_coeff
        };
        self.current_gain = coeff * self.current_gain + (1.0 - coeff) * self.target_gain;

        self.current_gain
    }

    fn publish_meter(&self) {
        self.meter.publish(
            self.current_gain as f32,
            self.gain_reduction_db() as f32,
            self.envelope as f32,
            self.is_ducking(),
        );
    }
}

impl<P: SampleSource, S: SampleSource> SampleSource for DuckingProcessor<P, S> {
    fn format(&self) -> SampleFormat {
        self.program.format()
    }

    fn read(&mut self, buffer: &mut [f32], offset: usize, count: usize) -> usize {
        let produced = self.program.read(buffer, offset, count);
        if produced == 0 {
            return 0;
        }

        if !self.config.enabled() {
            return produced;
        }

        self.sync_parameters();

        let channels = self.program.format().stride();
        let frames = produced.div_ceil(channels);
        let sidechain_channels = self.sidechain_channels;
        let wanted = frames * sidechain_channels;

        if self.sidechain_buffer.len() < wanted {
            self.sidechain_buffer.resize(wanted, 0.0);
        }
        let got = self
            .sidechain
            .read(&mut self.sidechain_buffer, 0, wanted)
            .min(wanted);
        self.sidechain_buffer[got..wanted].fill(0.0);

        let end = (offset + produced).min(buffer.len());

        for frame in 0..frames {
            let base = frame * sidechain_channels;
            let peak = self.sidechain_buffer[base..base + sidechain_channels]
                .iter()
                .fold(0.0f32, |peak, sample| peak.max(sample.abs()));

            let gain = self.process_position(f64::from(peak)) as f32;

            let start = offset + frame * channels;
            let stop = (start + channels).min(end);
            if start < stop {
                for sample in &mut buffer[start..stop] {
                    *sample *= gain;
                }
            }
        }

        self.publish_meter();
        produced
    }
}
