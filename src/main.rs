use std::sync::Arc;

use gift_finder_api::{
    api::{create_router, AppState, ResultLimits},
    config::{Config, LogFormat},
    services::{CatalogSource, FallbackCatalog, JsonFileCatalog, StaticCatalog},
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "gift_finder_api=info,tower_http=info";

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

/// Picks the catalog source: the configured file with the demo catalog as fallback,
/// or the demo catalog alone
fn build_catalog(config: &Config) -> anyhow::Result<Arc<dyn CatalogSource>> {
    let sample: Arc<dyn CatalogSource> = Arc::new(StaticCatalog::sample()?);

    let catalog: Arc<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path, "Using JSON file catalog");
            Arc::new(FallbackCatalog::new(
                Arc::new(JsonFileCatalog::new(path)),
                sample,
            ))
        }
        None => {
            tracing::info!("CATALOG_PATH not set, using built-in demo catalog");
            sample
        }
    };

    Ok(catalog)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    let catalog = build_catalog(&config)?;
    let state = AppState::new(catalog, ResultLimits::from(&config));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
