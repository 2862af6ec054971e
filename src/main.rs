use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use surfcast::api::AppState;
use surfcast::config::SurfcastConfig;
use surfcast::ingest::IngestService;
use surfcast::marine::StormglassClient;
use surfcast::store::SurfStore;
use surfcast::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = SurfcastConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    info!("surfcast {} starting", surfcast::VERSION);

    let store = SurfStore::open(config.store.resolved_location())
        .context("Failed to open the record store")?;
    store.sync_catalog(&config.spots).await?;

    let provider = StormglassClient::new(&config.provider)?;
    let ingest = Arc::new(IngestService::new(
        store.clone(),
        Arc::new(provider),
        config.thresholds,
        config.provider.window_hours,
    ));

    // Prime the store so the first query has something to answer with.
    match ingest.run_once().await {
        Ok(summary) => info!(
            "Startup ingestion saved {} records across {} spots",
            summary.saved, summary.spots
        ),
        Err(e) => warn!("Startup ingestion failed, serving existing records: {:#}", e),
    }

    web::run(AppState { store, ingest }, &config.server).await
}

fn init_tracing(config: &SurfcastConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
