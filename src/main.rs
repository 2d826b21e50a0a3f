use anyhow::{Context, Result};
use clap::Parser;
use job_analyzer::cli::{handle_command, Cli};
use job_analyzer::core::ConfigManager;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.server.log_file)
        .with_context(|| {
            format!(
                "Failed to open log file {}",
                config.server.log_file.display()
            )
        })?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter)),
        )
        .init();

    info!("Configuration loaded for environment: {}", config.environment);

    handle_command(cli, config).await
}
