//! Named parameter presets.
//!
//! A preset sets threshold, reduction, attack and release, and optionally
//! hold. `ratio` is never touched.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DuckingPreset {
    Gentle,
    Moderate,
    Aggressive,
    Podcast,
}

/// Values written by a preset. `hold_ms: None` keeps the current hold time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetValues {
    pub threshold_db: f32,
    pub reduction_db: f32,
    pub attack_ms: f32,
    pub hold_ms: Option<f32>,
    pub release_ms: f32,
}

impl DuckingPreset {
    pub const ALL: [DuckingPreset; 4] = [
        DuckingPreset::Gentle,
        DuckingPreset::Moderate,
        DuckingPreset::Aggressive,
        DuckingPreset::Podcast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DuckingPreset::Gentle => "gentle",
            DuckingPreset::Moderate => "moderate",
            DuckingPreset::Aggressive => "aggressive",
            DuckingPreset::Podcast => "podcast",
        }
    }

    /// Case-insensitive lookup. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    pub fn values(self) -> PresetValues {
        match self {
            DuckingPreset::Gentle => PresetValues {
                threshold_db: -25.0,
                reduction_db: -6.0,
                attack_ms: 100.0,
                hold_ms: None,
                release_ms: 500.0,
            },
            DuckingPreset::Moderate => PresetValues {
                threshold_db: -20.0,
                reduction_db: -12.0,
                attack_ms: 50.0,
                hold_ms: Some(100.0),
                release_ms: 300.0,
            },
            DuckingPreset::Aggressive => PresetValues {
                threshold_db: -30.0,
                reduction_db: -24.0,
                attack_ms: 10.0,
                hold_ms: Some(200.0),
                release_ms: 200.0,
            },
            DuckingPreset::Podcast => PresetValues {
                threshold_db: -22.0,
                reduction_db: -15.0,
                attack_ms: 30.0,
                hold_ms: Some(150.0),
                release_ms: 400.0,
            },
        }
    }
}

impl fmt::Display for DuckingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
