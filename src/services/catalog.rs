//! Gift catalog sources
//!
//! The scorer never knows where items come from. Each source hands back a
//! fresh, normalized `Vec<GiftItem>` per request; ranking happens afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::GiftItem,
};

const SAMPLE_CATALOG_JSON: &str = include_str!("../../data/sample_catalog.json");

/// Trait for anything that can supply the gift catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads the full catalog, including inactive items
    async fn load(&self) -> AppResult<Vec<GiftItem>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Parses a JSON array of gift items and normalizes their tags
pub fn parse_catalog(json: &str) -> AppResult<Vec<GiftItem>> {
    let items: Vec<GiftItem> = serde_json::from_str(json)?;
    Ok(items.into_iter().map(GiftItem::normalize).collect())
}

/// In-memory catalog, by default the built-in demo data
#[derive(Clone)]
pub struct StaticCatalog {
    items: Arc<Vec<GiftItem>>,
}

impl StaticCatalog {
    pub fn new(items: Vec<GiftItem>) -> Self {
        Self {
            items: Arc::new(items.into_iter().map(GiftItem::normalize).collect()),
        }
    }

    /// The demo catalog embedded in the binary
    pub fn sample() -> AppResult<Self> {
        let items = parse_catalog(SAMPLE_CATALOG_JSON)?;
        Ok(Self {
            items: Arc::new(items),
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticCatalog {
    async fn load(&self) -> AppResult<Vec<GiftItem>> {
        Ok(self.items.as_ref().clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Catalog read from a JSON file on every load, so edits show up without a restart
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load(&self) -> AppResult<Vec<GiftItem>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read catalog file");
            AppError::Catalog(format!("{}: {}", self.path.display(), e))
        })?;

        let items = parse_catalog(&contents)?;
        tracing::debug!(
            path = %self.path.display(),
            item_count = items.len(),
            "Loaded catalog file"
        );
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

/// Serves the fallback catalog whenever the primary source fails
pub struct FallbackCatalog {
    primary: Arc<dyn CatalogSource>,
    fallback: Arc<dyn CatalogSource>,
}

impl FallbackCatalog {
    pub fn new(primary: Arc<dyn CatalogSource>, fallback: Arc<dyn CatalogSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FallbackCatalog {
    async fn load(&self) -> AppResult<Vec<GiftItem>> {
        match self.primary.load().await {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "Primary catalog unavailable, serving fallback"
                );
                self.fallback.load().await
            }
        }
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}
