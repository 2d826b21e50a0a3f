// src/analysis/documents.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    JobPost,
    Video,
}

/// Transient text handed to the retrieval service, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub page_content: String,
    pub source: DocumentSource,
}

impl SourceDocument {
    pub fn job_post(description: &str) -> Self {
        Self {
            page_content: description.to_string(),
            source: DocumentSource::JobPost,
        }
    }

    pub fn video(transcript: &str) -> Self {
        Self {
            page_content: transcript.to_string(),
            source: DocumentSource::Video,
        }
    }
}

/// The job post document always comes first; a video document only with a transcript.
pub fn build_documents(description: &str, transcript: Option<&str>) -> Vec<SourceDocument> {
    let mut documents = vec![SourceDocument::job_post(description)];
    if let Some(text) = transcript {
        documents.push(SourceDocument::video(text));
    }
    documents
}
