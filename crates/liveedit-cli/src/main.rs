mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use liveedit_config::Config;
use liveedit_storage::ProjectStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }

    match cli.command {
        cli::Commands::Serve {
            host,
            port,
            static_dir,
        } => commands::serve::handle(config, host, port, static_dir).await,
        cli::Commands::Project(project_cmd) => {
            let store = ProjectStore::new(config.storage.data_file.clone());
            commands::project::handle(project_cmd, &store).await
        }
    }
}
