// src/core/config_manager.rs
//! Unified configuration: `.env`, optional `config.yaml`, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    pub environment: String,
    pub scraper: ScraperConfig,
    pub services: ServiceConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agents: Vec<String>,
    pub accept_language: String,
    pub excluded_domains: Vec<String>,
    pub brand_name: String,
    pub document_extensions: Vec<String>,
    pub min_line_length: usize,
    pub noise_patterns: Vec<String>,
    pub detect_block_pages: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub transcription_url: String,
    pub generation_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub log_file: PathBuf,
    pub log_filter: String,
}

#[derive(Debug, Default, Deserialize)]
struct EnvironmentSection {
    #[serde(default)]
    scraper: Option<ScraperConfig>,
    #[serde(default)]
    services: Option<ServiceConfig>,
    #[serde(default)]
    server: Option<ServerConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_retries: 2,
            retry_backoff_ms: 500,
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0".to_string(),
            ],
            accept_language: "en-US,en;q=0.9".to_string(),
            excluded_domains: vec![
                "upwork.com".to_string(),
                "www.upwork.com".to_string(),
                "support.upwork.com".to_string(),
                "help.upwork.com".to_string(),
            ],
            brand_name: "Upwork".to_string(),
            document_extensions: ["pdf", "doc", "docx", "xls", "xlsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            min_line_length: 30,
            noise_patterns: default_noise_patterns(),
            detect_block_pages: true,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            transcription_url: "http://127.0.0.1:5556".to_string(),
            generation_url: "http://127.0.0.1:5555".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            log_file: PathBuf::from("/tmp/job-post-analyzer.log"),
            log_filter: "job_analyzer=info,rocket::server=off".to_string(),
        }
    }
}

/// Recruiting-platform boilerplate: prices, counters, timestamps, marketing copy.
///
/// Every pattern is matched case-insensitively except the hyphen-fragment
/// heuristic, which opts out with `(?-i)` since it keys on capitalisation.
pub fn default_noise_patterns() -> Vec<String> {
    [
        r"\$[\d,.]+",
        r"Proposals:.*",
        r"Interviewing:\d+",
        r"Invites sent:\d+",
        r"Last viewed by client:.*",
        r"How it works",
        r"About Upwork",
        r"Find the best freelance jobs",
        r"Explore Upwork opportunities",
        r"total spent",
        r"\d+ hires",
        r"Posted On:",
        r"(?-i)^-\s[A-Z][a-z]+[A-Z]",
        r"Remote Job",
        r"Ongoing projectProject Type",
        r"Activity on this job",
    ]
    .iter()
    .map(|pattern| pattern.to_string())
    .collect()
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        // A missing .env is fine; real deployments set variables directly
        if let Some(e) = dotenv_failure(dotenvy::dotenv()) {
            warn!("Ignoring unreadable .env file: {}", e);
        }

        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::load_from_file(Path::new(CONFIG_FILE), &environment)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("APP_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            info!("{} not found, using built-in defaults", path.display());
            return Ok(Self {
                environment: environment.to_string(),
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Build a configuration from YAML text for the given environment name
    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(Self {
            environment: environment.to_string(),
            scraper: section.scraper.unwrap_or_default(),
            services: section.services.unwrap_or_default(),
            server: section.server.unwrap_or_default(),
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("TRANSCRIPTION_API_URL") {
            self.services.transcription_url = url;
        }
        if let Ok(url) = std::env::var("GENERATION_API_URL") {
            self.services.generation_url = url;
        }
        if let Ok(key) = std::env::var("GENERATION_API_KEY") {
            self.services.api_key = Some(key);
        }
        if let Ok(secs) = std::env::var("SCRAPER_TIMEOUT_SECS") {
            self.scraper.timeout_secs = secs
                .parse()
                .context("SCRAPER_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        if let Ok(retries) = std::env::var("SCRAPER_MAX_RETRIES") {
            self.scraper.max_retries = retries
                .parse()
                .context("SCRAPER_MAX_RETRIES must be a non-negative integer")?;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .context("SERVER_PORT must be a valid port number")?;
        }
        if let Ok(path) = std::env::var("LOG_FILE") {
            self.server.log_file = PathBuf::from(path);
        }
        Ok(())
    }
}

/// Any `.env` problem other than the file being absent.
fn dotenv_failure(result: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    result.err().filter(|e| !e.not_found())
}
