use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

#[derive(Args, Debug)]
pub struct InitDbArgs {
    #[arg(long, env = "DATABASE_URL", help = "SQLite database URL")]
    pub database_url: Option<String>,
}

pub async fn handle(args: InitDbArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("failed to open {}", config.database.url))?;
    DatabaseManager::bootstrap_schema(&pool)
        .await
        .context("failed to create schema")?;
    pool.close().await;

    tracing::info!("Schema ready at {}", config.database.url);
    Ok(())
}
