//! Shared-config handle for building processors.

use ducker_core::{Arc, Result, SampleSource};

use crate::{DuckingConfig, DuckingProcessor, DuckingSettings};

/// Owns the config that "global" ducking processors share.
///
/// Cloning the handle shares the same config. Processors built with
/// [`processor`](Self::processor) follow every change made through it;
/// processors built with [`custom_processor`](Self::custom_processor) get a
/// private config and are unaffected.
#[derive(Debug, Clone, Default)]
pub struct DuckingHandle {
    config: Arc<DuckingConfig>,
}

impl DuckingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Arc<DuckingConfig>) -> Self {
        Self { config }
    }

    pub fn from_settings(settings: &DuckingSettings) -> Self {
        Self::with_config(Arc::new(DuckingConfig::from_settings(settings)))
    }

    pub fn config(&self) -> &Arc<DuckingConfig> {
        &self.config
    }

    /// Processor that reads the shared config.
    pub fn processor<P, S>(&self, program: P, sidechain: S) -> Result<DuckingProcessor<P, S>>
    where
        P: SampleSource,
        S: SampleSource,
    {
        DuckingProcessor::new(program, sidechain, Arc::clone(&self.config))
    }

    /// Processor with a private config, seeded from `settings` or, if `None`,
    /// from the shared config's current values.
    pub fn custom_processor<P, S>(
        &self,
        program: P,
        sidechain: S,
        settings: Option<&DuckingSettings>,
    ) -> Result<DuckingProcessor<P, S>>
    where
        P: SampleSource,
        S: SampleSource,
    {
        let seed = settings.copied().unwrap_or_else(|| self.config.snapshot());
        let config = Arc::new(DuckingConfig::from_settings(&seed));
        tracing::debug!(?seed, "building ducking processor with custom config");
        DuckingProcessor::new(program, sidechain, config)
    }
}
