// src/analysis/generation.rs
use super::documents::SourceDocument;
use crate::core::config_manager::ServiceConfig;
use crate::core::ServiceClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::info;

const ANALYZE_ENDPOINT: &str = "/analyze";
const PROPOSAL_ENDPOINT: &str = "/proposal";

pub const ANALYSIS_QUERY: &str =
    "Extract the technical requirements, client pain points, project goals and deliverables";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalTone {
    #[default]
    Default,
    Formal,
    Casual,
    Technical,
}

impl FromStr for ProposalTone {
    type Err = Infallible;

    /// Unknown tones fall back to `Default`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "formal" => ProposalTone::Formal,
            "casual" => ProposalTone::Casual,
            "technical" => ProposalTone::Technical,
            _ => ProposalTone::Default,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub bullet_points: String,
    pub job_title: String,
    pub has_video: bool,
    pub tone: ProposalTone,
}

#[async_trait]
pub trait Generator: Send + Sync {
    async fn analyze(&self, documents: &[SourceDocument], query: &str) -> Result<String>;
    async fn draft_proposal(&self, request: &ProposalRequest) -> Result<String>;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    documents: &'a [SourceDocument],
    query: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ProposalResponse {
    proposal: String,
}

/// Client for the hosted retrieval-augmented generation service.
pub struct GenerationClient {
    client: ServiceClient,
}

impl GenerationClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = ServiceClient::new(
            &config.generation_url,
            config.api_key.clone(),
            config.timeout_secs,
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Generator for GenerationClient {
    async fn analyze(&self, documents: &[SourceDocument], query: &str) -> Result<String> {
        info!("Requesting analysis over {} documents", documents.len());
        let response: AnalyzeResponse = self
            .client
            .post_json(ANALYZE_ENDPOINT, &AnalyzeRequest { documents, query })
            .await
            .context("Failed to analyze job post")?;
        Ok(response.answer)
    }

    async fn draft_proposal(&self, request: &ProposalRequest) -> Result<String> {
        info!(
            "Requesting {:?} proposal for '{}' (video: {})",
            request.tone, request.job_title, request.has_video
        );
        let response: ProposalResponse = self
            .client
            .post_json(PROPOSAL_ENDPOINT, request)
            .await
            .context("Failed to draft proposal")?;
        Ok(response.proposal)
    }
}

/// Keep text that already carries bullets; otherwise bullet every non-empty line.
pub fn to_bullet_points(analysis: &str) -> String {
    if analysis.contains('-') || analysis.contains('•') {
        return analysis.trim().to_string();
    }
    analysis
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parsing() {
        assert_eq!("Formal".parse::<ProposalTone>().unwrap(), ProposalTone::Formal);
        assert_eq!(" casual ".parse::<ProposalTone>().unwrap(), ProposalTone::Casual);
        assert_eq!("TECHNICAL".parse::<ProposalTone>().unwrap(), ProposalTone::Technical);
        assert_eq!("pirate".parse::<ProposalTone>().unwrap(), ProposalTone::Default);
    }

    #[test]
    fn test_bullets_kept_when_present() {
        let analysis = "  - Rust backend\n- Postgres  ";
        assert_eq!(to_bullet_points(analysis), "- Rust backend\n- Postgres");
    }

    #[test]
    fn test_bullets_added_when_missing() {
        let analysis = "Needs a Rust backend\n\n  Wants weekly demos ";
        assert_eq!(
            to_bullet_points(analysis),
            "- Needs a Rust backend\n- Wants weekly demos"
        );
    }

    #[test]
    fn test_proposal_request_wire_format() {
        let request = ProposalRequest {
            bullet_points: "- a".to_string(),
            job_title: "Senior Engineer".to_string(),
            has_video: false,
            tone: ProposalTone::Casual,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tone"], "casual");
        assert_eq!(json["has_video"], false);
    }
}
