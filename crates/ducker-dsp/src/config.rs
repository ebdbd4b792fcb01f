//! Ducking parameters with clamped setters and change tracking.
//!
//! A [`DuckingConfig`] is meant to be wrapped in an `Arc` and shared: a UI
//! thread calls the setters while one or more audio threads read the values.
//! Every field is an independent atomic, so a batch of changes (a preset) is
//! not observed atomically by a concurrent processing call.
//!
//! Processors detect changes by polling [`DuckingConfig::version`]. Hosts that
//! want push notifications register a listener with
//! [`DuckingConfig::on_change`].

use std::fmt;

use ducker_core::{Arc, AtomicFlag, AtomicFloat, AtomicU64, Ordering};
use parking_lot::Mutex;

use crate::presets::DuckingPreset;
use crate::settings::DuckingSettings;
use crate::utils::db_to_amplitude;

/// Valid range and default for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp into `[min, max]`. NaN falls back to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const THRESHOLD_DB: ParamRange = ParamRange::new(-60.0, 0.0, -20.0);
pub const REDUCTION_DB: ParamRange = ParamRange::new(-40.0, 0.0, -12.0);
pub const ATTACK_MS: ParamRange = ParamRange::new(1.0, 500.0, 50.0);
pub const HOLD_MS: ParamRange = ParamRange::new(0.0, 1000.0, 100.0);
pub const RELEASE_MS: ParamRange = ParamRange::new(10.0, 2000.0, 300.0);
pub const RATIO: ParamRange = ParamRange::new(1.0, 20.0, 4.0);

/// Identifies the field a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    Enabled,
    ThresholdDb,
    ReductionDb,
    AttackMs,
    HoldMs,
    ReleaseMs,
    Ratio,
}

/// Token returned by [`DuckingConfig::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(ConfigParam) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// Tunable parameters of the ducking chain.
pub struct DuckingConfig {
    enabled: AtomicFlag,
    threshold_db: AtomicFloat,
    reduction_db: AtomicFloat,
    attack_ms: AtomicFloat,
    hold_ms: AtomicFloat,
    release_ms: AtomicFloat,
    ratio: AtomicFloat,

    version: AtomicU64,
    listeners: Mutex<Listeners>,
}

impl Default for DuckingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DuckingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuckingConfig")
            .field("enabled", &self.enabled())
            .field("threshold_db", &self.threshold_db())
            .field("reduction_db", &self.reduction_db())
            .field("attack_ms", &self.attack_ms())
            .field("hold_ms", &self.hold_ms())
            .field("release_ms", &self.release_ms())
            .field("ratio", &self.ratio())
            .field("version", &self.version())
            .finish()
    }
}

impl DuckingConfig {
    pub fn new() -> Self {
        Self {
            enabled: AtomicFlag::new(true),
            threshold_db: AtomicFloat::new(THRESHOLD_DB.default),
            reduction_db: AtomicFloat::new(REDUCTION_DB.default),
            attack_ms: AtomicFloat::new(ATTACK_MS.default),
            hold_ms: AtomicFloat::new(HOLD_MS.default),
            release_ms: AtomicFloat::new(RELEASE_MS.default),
            ratio: AtomicFloat::new(RATIO.default),
            version: AtomicU64::new(0),
            listeners: Mutex::new(Listeners::default()),
        }
    }

    /// New config wrapped for sharing between processors.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Build a config from a settings snapshot, clamping every field.
    pub fn from_settings(settings: &DuckingSettings) -> Self {
        let config = Self::new();
        config.apply_settings(settings);
        config
    }

    // --- Getters ---

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    #[inline]
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db.get()
    }

    #[inline]
    pub fn reduction_db(&self) -> f32 {
        self.reduction_db.get()
    }

    #[inline]
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms.get()
    }

    #[inline]
    pub fn hold_ms(&self) -> f32 {
        self.hold_ms.get()
    }

    #[inline]
    pub fn release_ms(&self) -> f32 {
        self.release_ms.get()
    }

    /// Stored and clamped, but not used by the gain computation.
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.ratio.get()
    }

    /// Level above which ducking engages, as linear amplitude.
    #[inline]
    pub fn threshold_linear(&self) -> f32 {
        db_to_amplitude(f64::from(self.threshold_db())) as f32
    }

    /// Gain applied while fully ducked, as linear amplitude.
    #[inline]
    pub fn reduction_linear(&self) -> f32 {
        db_to_amplitude(f64::from(self.reduction_db())) as f32
    }

    /// Change counter, bumped after every stored change.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    // --- Setters ---

    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled) != enabled {
            self.changed(ConfigParam::Enabled);
        }
    }

    pub fn set_threshold_db(&self, db: f32) {
        self.store(&self.threshold_db, THRESHOLD_DB.clamp(db), ConfigParam::ThresholdDb);
    }

    pub fn set_reduction_db(&self, db: f32) {
        self.store(&self.reduction_db, REDUCTION_DB.clamp(db), ConfigParam::ReductionDb);
    }

    pub fn set_attack_ms(&self, ms: f32) {
        self.store(&self.attack_ms, ATTACK_MS.clamp(ms), ConfigParam::AttackMs);
    }

    pub fn set_hold_ms(&self, ms: f32) {
        self.store(&self.hold_ms, HOLD_MS.clamp(ms), ConfigParam::HoldMs);
    }

    pub fn set_release_ms(&self, ms: f32) {
        self.store(&self.release_ms, RELEASE_MS.clamp(ms), ConfigParam::ReleaseMs);
    }

    pub fn set_ratio(&self, ratio: f32) {
        self.store(&self.ratio, RATIO.clamp(ratio), ConfigParam::Ratio);
    }

    #[inline]
    fn store(&self, field: &AtomicFloat, value: f32, param: ConfigParam) {
        if field.swap(value).to_bits() != value.to_bits() {
            self.changed(param);
        }
    }

    fn changed(&self, param: ConfigParam) {
        self.version.fetch_add(1, Ordering::Release);

        // Listeners run outside the lock so they may call back into the config.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(param);
        }
    }

    // --- Bulk operations ---

    /// Copy of the current values.
    pub fn snapshot(&self) -> DuckingSettings {
        DuckingSettings {
            enabled: self.enabled(),
            threshold_db: self.threshold_db(),
            reduction_db: self.reduction_db(),
            attack_ms: self.attack_ms(),
            hold_ms: self.hold_ms(),
            release_ms: self.release_ms(),
            ratio: self.ratio(),
        }
    }

    pub fn apply_settings(&self, settings: &DuckingSettings) {
        self.set_enabled(settings.enabled);
        self.set_threshold_db(settings.threshold_db);
        self.set_reduction_db(settings.reduction_db);
        self.set_attack_ms(settings.attack_ms);
        self.set_hold_ms(settings.hold_ms);
        self.set_release_ms(settings.release_ms);
        self.set_ratio(settings.ratio);
    }

    pub fn reset_to_defaults(&self) {
        self.apply_settings(&DuckingSettings::default());
    }

    pub fn apply_preset(&self, preset: DuckingPreset) {
        let values = preset.values();

        self.set_threshold_db(values.threshold_db);
        self.set_reduction_db(values.reduction_db);
        self.set_attack_ms(values.attack_ms);
        if let Some(hold_ms) = values.hold_ms {
            self.set_hold_ms(hold_ms);
        }
        self.set_release_ms(values.release_ms);

        tracing::debug!(preset = preset.name(), "applied ducking preset");
    }

    /// Apply a preset by name. Unknown names leave the config untouched.
    pub fn apply_preset_by_name(&self, name: &str) -> bool {
        match DuckingPreset::from_name(name) {
            Some(preset) => {
                self.apply_preset(preset);
                true
            }
            None => {
                tracing::debug!(name, "ignoring unknown ducking preset");
                false
            }
        }
    }

    // --- Listeners ---

    /// Register a callback invoked synchronously on the mutating thread
    /// after each stored change.
    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(ConfigParam) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        let id = ListenerId(listeners.next_id);
        let listener: Listener = Arc::new(listener);
        listeners.next_id += 1;
        listeners.entries.push((id, listener));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }
}
