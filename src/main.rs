use clap::Parser;
use tracing_subscriber::EnvFilter;

use blog_api::cli::{self, Cli};
use blog_api::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    let config = config::config().clone();

    let default_level = if config.api.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("Starting Blog API in {:?} mode", config.environment);

    cli::run(Cli::parse(), config).await
}
