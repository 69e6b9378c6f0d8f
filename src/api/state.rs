use std::sync::Arc;

use crate::config::Config;
use crate::services::{CatalogSource, StaticCatalog};

/// Default and maximum result counts per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    pub quiz: usize,
    pub search: usize,
    pub max: usize,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            quiz: 6,
            search: 10,
            max: 50,
        }
    }
}

impl ResultLimits {
    /// Clamps a client-requested limit to `[1, max]`, falling back to `default`
    pub fn resolve(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).clamp(1, self.max.max(1))
    }
}

impl From<&Config> for ResultLimits {
    fn from(config: &Config) -> Self {
        Self {
            quiz: config.quiz_result_limit,
            search: config.search_result_limit,
            max: config.max_result_limit,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub limits: ResultLimits,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, limits: ResultLimits) -> Self {
        Self { catalog, limits }
    }

    /// State backed by the built-in demo catalog with default limits
    pub fn with_sample_catalog() -> anyhow::Result<Self> {
        let catalog = StaticCatalog::sample()?;
        Ok(Self::new(Arc::new(catalog), ResultLimits::default()))
    }
}
