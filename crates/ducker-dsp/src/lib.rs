//! Sidechain ducking: attenuate a program stream (music) while a sidechain
//! stream (voice) is above a threshold.
//!
//! - [`DuckingConfig`]: clamped, shareable parameters with presets and change listeners
//! - [`DuckingProcessor`]: envelope follower, hold gate and gain smoother as a [`SampleSource`]
//! - [`DuckingHandle`]: builds processors that share one config or own a private one
//!
//! ## Example
//!
//! ```ignore
//! use ducker_dsp::{DuckingConfig, DuckingProcessor};
//!
//! let config = DuckingConfig::shared();
//! config.apply_preset_by_name("podcast");
//!
//! let mut ducker = DuckingProcessor::new(music, voice, config.clone())?;
//! let produced = ducker.read(&mut buffer, 0, buffer.len());
//! ```
//!
//! [`SampleSource`]: ducker_core::SampleSource

mod config;
pub use config::{
    ConfigParam, DuckingConfig, ListenerId, ParamRange, ATTACK_MS, HOLD_MS, RATIO, REDUCTION_DB,
    RELEASE_MS, THRESHOLD_DB,
};

mod settings;
pub use settings::DuckingSettings;

mod presets;
pub use presets::{DuckingPreset, PresetValues};

mod processor;
pub use processor::DuckingProcessor;

mod handles;
pub use handles::DuckingHandle;

pub mod utils;
