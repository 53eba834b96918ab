mod aggregator;
mod api;
mod config;
mod db;
mod error;
mod filter;
mod types;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::aggregator::PriceAggregator;
use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::db::MarketStore;
use crate::error::Result;

#[tokio::main]
async fn main() {
    // Exits with usage on bad flags or environment values.
    let cfg = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Database setup ---
    // Read-only: the ingestion service owns the schema.
    info!("Connecting to database: {}", cfg.db_uri);
    let store = MarketStore::connect(&cfg.db_uri, cfg.db_max_connections).await?;

    // --- HTTP API server ---
    let api_state = ApiState {
        aggregator: PriceAggregator::new(store),
        default_age_secs: cfg.min_updated_at_secs,
    };
    let app = router(api_state);
    let listener = tokio::net::TcpListener::bind(&cfg.listen).await?;
    info!(
        default_age_secs = cfg.min_updated_at_secs,
        "HTTP API listening on {}", cfg.listen
    );

    axum::serve(listener, app).await?;

    Ok(())
}
