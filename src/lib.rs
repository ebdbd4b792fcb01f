//! # Ducker - Sidechain Ducking Engine
//!
//! Attenuates a program stream (music) whenever a sidechain stream (voice)
//! rises above a threshold, with attack, hold and release smoothing.
//!
//! ## Architecture
//!
//! Ducker is an umbrella crate over:
//! - **ducker-core** - Sample sources, lock-free parameters, metering
//! - **ducker-dsp** - Ducking config, presets, processor
//!
//! ## Quick Start
//!
//! ```ignore
//! use ducker::prelude::*;
//!
//! // One config shared by every processor that should duck together
//! let handle = DuckingHandle::new();
//! handle.config().apply_preset(DuckingPreset::Podcast);
//!
//! let mut ducker = handle.processor(music, voice)?;
//!
//! // In the audio callback
//! let produced = ducker.read(&mut buffer, 0, buffer.len());
//!
//! // From the UI thread
//! let meter = ducker.meter();
//! println!("{:.1} dB", meter.gain_reduction_db());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default) - `Serialize`/`Deserialize` for [`DuckingSettings`]

mod error;
pub use error::{Error, Result};

/// Re-export of ducker-core for direct access
pub use ducker_core as core;

/// Re-export of ducker-dsp for direct access
pub use ducker_dsp as dsp;

pub use ducker_core::{
    AtomicFlag, AtomicFloat, BufferSource, DuckingMeter, MeterSnapshot, SampleFormat,
    SampleSource,
};

pub use ducker_dsp::{
    ConfigParam, DuckingConfig, DuckingHandle, DuckingPreset, DuckingProcessor, DuckingSettings,
    ListenerId, ParamRange, PresetValues,
};

/// Parameter ranges (min, max, default).
pub mod ranges {
    pub use ducker_dsp::{ATTACK_MS, HOLD_MS, RATIO, REDUCTION_DB, RELEASE_MS, THRESHOLD_DB};
}

pub mod prelude {
    //! Common imports.
    pub use crate::{
        BufferSource, ConfigParam, DuckingConfig, DuckingHandle, DuckingMeter, DuckingPreset,
        DuckingProcessor, DuckingSettings, Error, Result, SampleFormat, SampleSource,
    };
}
