// src/job_extraction/error.rs
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP error occurred: {0} {1}")]
    Status(u16, String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Request blocked by anti-bot page: {0}")]
    Blocked(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid job post URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Failures worth another attempt: timeouts, dropped connections, 429 and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status(code, _) => *code == 429 || *code >= 500,
            FetchError::Timeout(_) | FetchError::Network(_) => true,
            FetchError::Blocked(_) | FetchError::InvalidUrl(_) => false,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Job description section not found")]
    Structure,
    #[error("Job post scraping error: {0}")]
    Unknown(String),
}

/// Raised while classifying a single URL. Always recovered by excluding the URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("URL has no host: {0}")]
    MissingHost(String),
}
