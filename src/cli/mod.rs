pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(about = "Blog API - users, posts and comments over HTTP/JSON")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the database schema and exit")]
    InitDb(commands::init_db::InitDbArgs),
}

/// Dispatch a parsed command line. No subcommand means `serve` with defaults.
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::InitDb(args)) => commands::init_db::handle(args, config).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
    }
}
