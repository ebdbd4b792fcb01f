//! Parameter and meter cells shared between a control thread and the audio thread.
//!
//! A control thread (UI, automation) writes; the audio thread reads once per
//! frame. Writes use `Release` and reads `Acquire`, so a processor that sees a
//! bumped config version also sees the values stored before it.
//!
//! Each cell sits on its own cache line so a meter published every frame does
//! not contend with parameter reads.

use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicBool, Ordering};

/// A single `f32` parameter or meter reading.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFloat {
    value: AtomicF32,
}

impl AtomicFloat {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    /// Store without reporting the previous value. Used for meter publishing.
    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }

    /// Store and return what was there before.
    ///
    /// Setters compare the result bitwise against the new value to tell a real
    /// change from a repeated write of the same (already clamped) value.
    #[inline]
    pub fn swap(&self, value: f32) -> f32 {
        self.value.swap(value, Ordering::AcqRel)
    }
}

/// A single on/off switch or meter flag.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFlag {
    value: AtomicBool,
}

impl AtomicFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Release);
    }

    /// Store and return the previous state.
    #[inline]
    pub fn swap(&self, value: bool) -> bool {
        self.value.swap(value, Ordering::AcqRel)
    }
}
