// src/analysis/job_analyzer.rs
use super::documents::{build_documents, DocumentSource, SourceDocument};
use super::generation::{
    to_bullet_points, GenerationClient, Generator, ProposalRequest, ANALYSIS_QUERY,
};
use super::transcription::{HttpTranscriber, Transcriber, VideoInput};
use super::{AnalysisRequest, AnalysisResponse};
use crate::core::ConfigManager;
use crate::job_extraction::{JobPost, JobRecord, JobScraper};
use crate::utils::truncate_chars;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Anything that can turn a job URL into a `JobRecord`.
#[async_trait]
pub trait JobPostSource: Send + Sync {
    async fn fetch_job(&self, url: &str) -> JobRecord;
}

#[async_trait]
impl JobPostSource for JobScraper {
    async fn fetch_job(&self, url: &str) -> JobRecord {
        self.scrape(url).await
    }
}

pub struct JobAnalyzer {
    jobs: Arc<dyn JobPostSource>,
    transcriber: Arc<dyn Transcriber>,
    generator: Arc<dyn Generator>,
}

impl JobAnalyzer {
    pub fn new(
        jobs: Arc<dyn JobPostSource>,
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            jobs,
            transcriber,
            generator,
        }
    }

    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        Ok(Self::new(
            Arc::new(JobScraper::new(&config.scraper)?),
            Arc::new(HttpTranscriber::new(&config.services)?),
            Arc::new(GenerationClient::new(&config.services)?),
        ))
    }

    /// Run one analysis. The job post is mandatory; the video is best effort.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisResponse {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("analysis", request_id = %request_id, job_url = %request.job_url);
        self.perform_analysis(request, request_id)
            .instrument(span)
            .await
    }

    async fn perform_analysis(
        &self,
        request: AnalysisRequest,
        request_id: String,
    ) -> AnalysisResponse {
        info!("Starting job analysis");

        let job = match self.jobs.fetch_job(&request.job_url).await {
            JobRecord::Success(post) => post,
            JobRecord::Failure(failure) => {
                error!("Aborting analysis, job post unavailable: {}", failure.error);
                return AnalysisResponse::failed(request_id, None, failure.error);
            }
        };

        let mut warnings = Vec::new();
        let transcript = match &request.video {
            Some(video) => self.transcribe_optional(video, &mut warnings).await,
            None => None,
        };

        let documents = build_documents(&job.description, transcript.as_deref());

        match self.generate(&job, &documents, &request).await {
            Ok((analysis, proposal)) => {
                info!("Job analysis completed");
                AnalysisResponse {
                    success: true,
                    request_id,
                    job: Some(job),
                    transcript,
                    analysis: Some(analysis),
                    proposal: Some(proposal),
                    warnings,
                    error: None,
                    generated_at: chrono::Utc::now(),
                }
            }
            Err(e) => {
                error!("Generation failed: {:#}", e);
                let mut response =
                    AnalysisResponse::failed(request_id, Some(job), format!("{:#}", e));
                response.transcript = transcript;
                response.warnings = warnings;
                response
            }
        }
    }

    async fn transcribe_optional(
        &self,
        video: &VideoInput,
        warnings: &mut Vec<String>,
    ) -> Option<String> {
        match self.transcriber.transcribe(video).await {
            Ok(text) => {
                debug!("Transcript: {}", truncate_chars(&text, 200));
                Some(text)
            }
            Err(e) => {
                warn!("Video processing failed, continuing without it: {}", e);
                warnings.push(format!("Video processing failed: {}", e));
                None
            }
        }
    }

    async fn generate(
        &self,
        job: &JobPost,
        documents: &[SourceDocument],
        request: &AnalysisRequest,
    ) -> Result<(String, String)> {
        let analysis = self.generator.analyze(documents, ANALYSIS_QUERY).await?;

        let proposal_request = ProposalRequest {
            bullet_points: to_bullet_points(&analysis),
            job_title: job.title.clone(),
            has_video: documents
                .iter()
                .any(|document| document.source == DocumentSource::Video),
            tone: request.tone,
        };
        let proposal = self.generator.draft_proposal(&proposal_request).await?;

        Ok((analysis, proposal))
    }
}
