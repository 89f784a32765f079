use anyhow::Context;
use clap::Args;

use crate::app::app;
use crate::config::AppConfig;
use crate::state::AppState;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT / BLOG_API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    pub bind: String,

    #[arg(long, env = "DATABASE_URL", help = "SQLite database URL")]
    pub database_url: Option<String>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            port: None,
            bind: "0.0.0.0".to_string(),
            database_url: None,
        }
    }
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let bind_addr = format!("{}:{}", args.bind, config.api.port);
    let state = AppState::connect(config)
        .await
        .context("failed to open database")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Blog API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Blog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
