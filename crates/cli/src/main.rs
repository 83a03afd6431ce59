mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookgrab_core::{
    load_config, validate_config, CatalogIndexer, Config, DownloadExecutor, FsProvisioner,
    HttpCatalog,
};

use shell::Shell;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path; a missing file falls back to defaults so the
    // tool works out of the box.
    let config_path = std::env::var("BOOKGRAB_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file found, using defaults");
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!("Catalog: {}", config.catalog.base_url);
    info!("Download directory: {:?}", config.download.dir);

    let catalog = Arc::new(HttpCatalog::new(&config.catalog));
    let indexer = CatalogIndexer::new(catalog.clone());
    let executor = DownloadExecutor::new(catalog.clone(), catalog, &config.download);

    let shell = Shell::new(indexer, executor, FsProvisioner::new(), config);
    shell.run().await
}
