// src/job_extraction/fetcher.rs
use super::error::FetchError;
use crate::core::config_manager::ScraperConfig;
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Lowercased markers of anti-bot interstitials served with a 2xx status.
const BLOCK_PAGE_MARKERS: &[&str] = &[
    "<title>just a moment...</title>",
    "cf-browser-verification",
    "attention required! | cloudflare",
    "captcha-delivery.com",
];

#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    user_agents: Vec<String>,
    accept_language: String,
    timeout_secs: u64,
    max_retries: u32,
    retry_backoff: Duration,
    detect_block_pages: bool,
}

impl PageFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
            accept_language: config.accept_language.clone(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            detect_block_pages: config.detect_block_pages,
        })
    }

    /// Fetch a page body, retrying transient failures with exponential backoff.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.retry_backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        "Fetch attempt {} for {} failed ({}), retrying in {:?}",
                        attempt, url, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.pick_user_agent())
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown").to_string(),
            ));
        }

        let body = response.text().await.map_err(|e| self.classify_error(e))?;

        if self.detect_block_pages {
            if let Some(marker) = detect_block_page(&body) {
                return Err(FetchError::Blocked(marker.to_string()));
            }
        }

        info!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_USER_AGENT)
    }

    fn classify_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

fn detect_block_page(body: &str) -> Option<&'static str> {
    let lower = body.to_lowercase();
    BLOCK_PAGE_MARKERS
        .iter()
        .copied()
        .find(|marker| lower.contains(marker))
}
