//! Wanderlist Ranking Server
//!
//! Run with: cargo run --bin wanderlist-api
//!
//! # Configuration
//!
//! Settings come from `--config <FILE>` or the default config locations,
//! then environment variables:
//! - `WANDERLIST_HOST`: Host to bind to (default: 127.0.0.1)
//! - `WANDERLIST_PORT`: Port to listen on (default: 5000)
//! - `WANDERLIST_CATALOG`: Catalog file, `.json` or `.csv` (default: ./places.json)
//! - `WANDERLIST_REFERENCE`: Reference places file (default: the catalog itself)
//! - `WANDERLIST_LOG_LEVEL` / `WANDERLIST_LOG_FORMAT`
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wanderlist::api::{serve, AppState};
use wanderlist::catalog::{load_reference, Catalog};
use wanderlist::config::Config;
use wanderlist::ranker::Ranker;

#[derive(Parser)]
#[command(name = "wanderlist-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "History-aware ranking server for the places catalog")]
struct Args {
    /// Config file (default: ~/.config/wanderlist/config.toml, /etc/wanderlist/config.toml, ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    wanderlist::logging::init(&config.logging, "tower_http=debug");

    tracing::info!("Starting Wanderlist ranking server v{}", env!("CARGO_PKG_VERSION"));

    // Load catalog and reference places
    let catalog_path = Path::new(&config.ranking.catalog_path);
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("loading catalog from {:?}", catalog_path))?;

    if catalog.is_empty() {
        tracing::warn!("Catalog {:?} has no places", catalog_path);
    }

    let reference = match &config.ranking.reference_path {
        Some(path) => load_reference(Path::new(path))
            .with_context(|| format!("loading reference places from {:?}", path))?,
        None => {
            tracing::info!("No reference file configured, scoring the catalog against itself");
            Vec::new()
        }
    };

    // Build the ranker
    tracing::info!("Building ranker...");
    let ranker = Ranker::build(catalog, &reference, config.ranking.to_ranker_config())
        .context("building ranker")?;

    let api_config = config.server.to_api_config();
    let state = AppState::new(Arc::new(ranker), api_config.clone());

    // Run server
    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Wanderlist ranking server stopped");
    Ok(())
}

fn load_config() -> anyhow::Result<Config> {
    let args = Args::parse();

    match args.config {
        Some(path) => Config::load_with_env(&path)
            .with_context(|| format!("loading config from {:?}", path)),
        None => Ok(Config::load_default()),
    }
}
