//! Core types shared by the ducker crates.
//!
//! - [`SampleSource`] / [`SampleFormat`]: pull-based interleaved sample streams
//! - [`BufferSource`]: in-memory source for pre-decoded audio
//! - [`AtomicFloat`] / [`AtomicFlag`]: lock-free parameter storage
//! - [`DuckingMeter`]: gain reduction published by the audio thread

pub mod error;
pub use error::{Error, Result};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat};

mod source;
pub use source::{BufferSource, SampleFormat, SampleSource};

mod meter;
pub use meter::{DuckingMeter, MeterSnapshot};

pub use std::sync::atomic::{AtomicU64, Ordering};
pub use std::sync::Arc;
