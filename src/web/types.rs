// src/web/types.rs
use crate::analysis::{AnalysisRequest, JobAnalyzer, ProposalTone, VideoInput};
use crate::job_extraction::JobScraper;
use rocket::serde::{Deserialize, Serialize};

pub struct AppState {
    pub scraper: JobScraper,
    pub analyzer: JobAnalyzer,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ScrapeRequest {
    pub job_url: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzeJobRequest {
    pub job_url: String,
    pub video_url: Option<String>,
    pub tone: Option<String>,
}

impl From<AnalyzeJobRequest> for AnalysisRequest {
    fn from(request: AnalyzeJobRequest) -> Self {
        AnalysisRequest {
            job_url: request.job_url,
            video: request
                .video_url
                .filter(|url| !url.trim().is_empty())
                .map(VideoInput::Url),
            tone: request
                .tone
                .as_deref()
                .and_then(|tone| tone.parse::<ProposalTone>().ok())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub success: bool,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl StandardErrorResponse {
    pub fn new(error: &str, error_code: &str, suggestions: &[&str]) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            error_code: error_code.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}
