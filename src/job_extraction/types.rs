// src/job_extraction/types.rs
use super::error::{FetchError, ScrapeError};
use serde::{Deserialize, Serialize};

pub const TITLE_NOT_FOUND: &str = "Job Title Not Found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPost {
    pub title: String,
    pub description: String,
    pub links: Vec<String>,
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Structure,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    pub kind: FailureKind,
    pub error: String,
}

/// Result of scraping one job post: either the extracted post or the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobRecord {
    Success(JobPost),
    Failure(JobFailure),
}

impl JobRecord {
    pub fn post(&self) -> Option<&JobPost> {
        match self {
            JobRecord::Success(post) => Some(post),
            JobRecord::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            JobRecord::Success(_) => None,
            JobRecord::Failure(failure) => Some(&failure.error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobRecord::Success(_))
    }
}

impl From<Result<JobPost, ScrapeError>> for JobRecord {
    fn from(result: Result<JobPost, ScrapeError>) -> Self {
        match result {
            Ok(post) => JobRecord::Success(post),
            Err(e) => {
                let kind = match &e {
                    ScrapeError::Fetch(_) => FailureKind::Fetch,
                    ScrapeError::Structure => FailureKind::Structure,
                    ScrapeError::Unknown(_) => FailureKind::Unknown,
                };
                JobRecord::Failure(JobFailure {
                    kind,
                    error: e.to_string(),
                })
            }
        }
    }
}

impl From<FetchError> for JobRecord {
    fn from(e: FetchError) -> Self {
        JobRecord::from(Err::<JobPost, _>(ScrapeError::Fetch(e)))
    }
}
