//! Plain-value snapshot of a [`DuckingConfig`](crate::DuckingConfig).
//!
//! With the `serde` feature this is the shape hosts persist. Values read from
//! storage are clamped when applied to a config.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{ATTACK_MS, HOLD_MS, RATIO, REDUCTION_DB, RELEASE_MS, THRESHOLD_DB};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DuckingSettings {
    pub enabled: bool,
    pub threshold_db: f32,
    pub reduction_db: f32,
    pub attack_ms: f32,
    pub hold_ms: f32,
    pub release_ms: f32,
    pub ratio: f32,
}

impl Default for DuckingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_db: THRESHOLD_DB.default,
            reduction_db: REDUCTION_DB.default,
            attack_ms: ATTACK_MS.default,
            hold_ms: HOLD_MS.default,
            release_ms: RELEASE_MS.default,
            ratio: RATIO.default,
        }
    }
}

impl DuckingSettings {
    /// Copy with every field clamped into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            enabled: self.enabled,
            threshold_db: THRESHOLD_DB.clamp(self.threshold_db),
            reduction_db: REDUCTION_DB.clamp(self.reduction_db),
            attack_ms: ATTACK_MS.clamp(self.attack_ms),
            hold_ms: HOLD_MS.clamp(self.hold_ms),
            release_ms: RELEASE_MS.clamp(self.release_ms),
            ratio: RATIO.clamp(self.ratio),
        }
    }

    pub fn is_valid(&self) -> bool {
        THRESHOLD_DB.contains(self.threshold_db)
            && REDUCTION_DB.contains(self.reduction_db)
            && ATTACK_MS.contains(self.attack_ms)
            && HOLD_MS.contains(self.hold_ms)
            && RELEASE_MS.contains(self.release_ms)
            && RATIO.contains(self.ratio)
    }
}
