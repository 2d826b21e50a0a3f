// src/analysis/mod.rs
use crate::job_extraction::JobPost;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod documents;
pub mod generation;
pub mod job_analyzer;
pub mod transcription;

pub use documents::{DocumentSource, SourceDocument};
pub use generation::{GenerationClient, Generator, ProposalTone};
pub use job_analyzer::{JobAnalyzer, JobPostSource};
pub use transcription::{HttpTranscriber, Transcriber, TranscriptionError, VideoInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub job_url: String,
    #[serde(default)]
    pub video: Option<VideoInput>,
    #[serde(default)]
    pub tone: ProposalTone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub request_id: String,
    pub job: Option<JobPost>,
    pub transcript: Option<String>,
    pub analysis: Option<String>,
    pub proposal: Option<String>,
    pub warnings: Vec<String>,
    pub error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResponse {
    pub fn failed(request_id: String, job: Option<JobPost>, error: String) -> Self {
        Self {
            success: false,
            request_id,
            job,
            transcript: None,
            analysis: None,
            proposal: None,
            warnings: Vec::new(),
            error: Some(error),
            generated_at: Utc::now(),
        }
    }
}
