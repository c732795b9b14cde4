use anyhow::Result;
use clap::Parser;

use kinfolk::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = kinfolk::cli::load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Extract { page } => kinfolk::cli::extract::run(&page, config).await,
        Commands::Ingest { dir, db } => kinfolk::cli::ingest::run(&dir, &db, config).await,
        Commands::List { db, search, json } => {
            kinfolk::cli::list::run(&db, search.as_deref(), json).await
        }
    }
}
