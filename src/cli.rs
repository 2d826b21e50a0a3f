// src/cli.rs
use crate::analysis::{AnalysisRequest, JobAnalyzer, ProposalTone, VideoInput};
use crate::core::ConfigManager;
use crate::job_extraction::JobScraper;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "job-post-analyzer")]
#[command(about = "Extract job posts and draft tailored proposals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape one or more job posts and print the records as JSON
    Scrape {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Scrape a job post, optionally transcribe a video, then analyze and draft a proposal
    Analyze {
        url: String,
        #[arg(long, conflicts_with = "video_file")]
        video_url: Option<String>,
        #[arg(long)]
        video_file: Option<PathBuf>,
        /// default, formal, casual or technical
        #[arg(long, default_value = "default")]
        tone: String,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Command {
    fn video_input(video_url: Option<String>, video_file: Option<PathBuf>) -> Option<VideoInput> {
        video_url
            .map(VideoInput::Url)
            .or_else(|| video_file.map(VideoInput::File))
    }
}

pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Scrape { urls } => {
            let scraper = JobScraper::new(&config.scraper)?;
            let records = scraper.scrape_many(&urls).await;
            let output = match records.as_slice() {
                [record] => serde_json::to_string_pretty(record),
                all => serde_json::to_string_pretty(all),
            };
            println!("{}", output.context("Failed to serialize job records")?);
        }

        Command::Analyze {
            url,
            video_url,
            video_file,
            tone,
        } => {
            let analyzer = JobAnalyzer::from_config(&config)?;
            let request = AnalysisRequest {
                job_url: url,
                video: Command::video_input(video_url, video_file),
                tone: tone.parse::<ProposalTone>().unwrap_or_default(),
            };
            let response = analyzer.analyze(request).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .context("Failed to serialize analysis response")?
            );
            if let Some(error) = response.error {
                anyhow::bail!("Analysis failed: {}", error);
            }
        }

        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            info!("Environment: {}", config.environment);
            start_web_server(config).await?;
        }
    }

    Ok(())
}
