//! Gain-reduction meter shared between the audio thread and a UI.

use crate::{AtomicFlag, AtomicFloat};

/// Lock-free view of a processor's ducking state.
///
/// The audio thread publishes once per processed frame; readers on any thread
/// see the most recent frame's values.
#[derive(Debug)]
pub struct DuckingMeter {
    gain: AtomicFloat,
    gain_reduction_db: AtomicFloat,
    envelope: AtomicFloat,
    ducking: AtomicFlag,
}

/// Point-in-time copy of a [`DuckingMeter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterSnapshot {
    pub gain: f32,
    pub gain_reduction_db: f32,
    pub envelope: f32,
    pub ducking: bool,
}

impl Default for DuckingMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckingMeter {
    pub fn new() -> Self {
        Self {
            gain: AtomicFloat::new(1.0),
            gain_reduction_db: AtomicFloat::new(0.0),
            envelope: AtomicFloat::new(0.0),
            ducking: AtomicFlag::new(false),
        }
    }

    #[inline]
    pub fn publish(&self, gain: f32, gain_reduction_db: f32, envelope: f32, ducking: bool) {
        self.gain.set(gain);
        self.gain_reduction_db.set(gain_reduction_db);
        self.envelope.set(envelope);
        self.ducking.set(ducking);
    }

    #[inline]
    pub fn gain(&self) -> f32 {
        self.gain.get()
    }

    #[inline]
    pub fn gain_reduction_db(&self) -> f32 {
        self.gain_reduction_db.get()
    }

    #[inline]
    pub fn envelope(&self) -> f32 {
        self.envelope.get()
    }

    #[inline]
    pub fn is_ducking(&self) -> bool {
        self.ducking.get()
    }

    pub fn snapshot(&self) -> MeterSnapshot {
        MeterSnapshot {
            gain: self.gain(),
            gain_reduction_db: self.gain_reduction_db(),
            envelope: self.envelope(),
            ducking: self.is_ducking(),
        }
    }

    pub fn reset(&self) {
        self.publish(1.0, 0.0, 0.0, false);
    }
}
