// src/analysis/transcription.rs
use crate::core::config_manager::ServiceConfig;
use crate::core::ServiceClient;
use crate::utils::validate_file_extension;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

const TRANSCRIBE_URL_ENDPOINT: &str = "/transcribe";
const TRANSCRIBE_UPLOAD_ENDPOINT: &str = "/transcribe/upload";

pub const SUPPORTED_MEDIA_EXTENSIONS: &[&str] = &["mp4", "mov", "mp3"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoInput {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("transcription service unreachable: {0}")]
    Network(String),
    #[error("unreadable transcription result: {0}")]
    Format(String),
    #[error("unsupported video input: {0}")]
    Unsupported(String),
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, input: &VideoInput) -> Result<String, TranscriptionError>;
}

#[derive(Serialize)]
struct TranscribeUrlRequest<'a> {
    video_url: &'a str,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    text: String,
}

/// Check the input before anything is sent to the transcription service.
pub fn validate_input(input: &VideoInput) -> Result<(), TranscriptionError> {
    match input {
        VideoInput::Url(url) => {
            let parsed = url::Url::parse(url)
                .map_err(|e| TranscriptionError::Unsupported(format!("{}: {}", url, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(TranscriptionError::Unsupported(format!(
                    "{}: only http(s) video URLs are accepted",
                    url
                )));
            }
            Ok(())
        }
        VideoInput::File(path) => {
            let name = path.to_string_lossy();
            validate_file_extension(&name, SUPPORTED_MEDIA_EXTENSIONS)
                .map_err(|e| TranscriptionError::Unsupported(e.to_string()))?;
            if !path.is_file() {
                return Err(TranscriptionError::Unsupported(format!(
                    "file not found: {}",
                    path.display()
                )));
            }
            Ok(())
        }
    }
}

pub struct HttpTranscriber {
    client: ServiceClient,
}

impl HttpTranscriber {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let client = ServiceClient::new(
            &config.transcription_url,
            config.api_key.clone(),
            config.timeout_secs,
        )?;
        Ok(Self { client })
    }
}

fn classify_service_error(e: anyhow::Error) -> TranscriptionError {
    let is_decode = e
        .chain()
        .filter_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .any(|cause| cause.is_decode());
    if is_decode {
        TranscriptionError::Format(format!("{:#}", e))
    } else {
        TranscriptionError::Network(format!("{:#}", e))
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, input: &VideoInput) -> Result<String, TranscriptionError> {
        validate_input(input)?;

        let response: TranscriptResponse = match input {
            VideoInput::Url(url) => {
                info!("Requesting transcript for video URL: {}", url);
                self.client
                    .post_json::<_, TranscriptResponse>(
                        TRANSCRIBE_URL_ENDPOINT,
                        &TranscribeUrlRequest { video_url: url },
                    )
                    .await
            }
            VideoInput::File(path) => {
                info!("Uploading video for transcription: {}", path.display());
                self.client
                    .post_file::<TranscriptResponse>(TRANSCRIBE_UPLOAD_ENDPOINT, "file", path)
                    .await
            }
        }
        .map_err(classify_service_error)?;

        let text = response.text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::Format("empty transcript".to_string()));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_inputs() {
        assert!(validate_input(&VideoInput::Url("https://youtu.be/abc".to_string())).is_ok());
        assert!(matches!(
            validate_input(&VideoInput::Url("ftp://host/video.mp4".to_string())),
            Err(TranscriptionError::Unsupported(_))
        ));
        assert!(matches!(
            validate_input(&VideoInput::Url("not a url".to_string())),
            Err(TranscriptionError::Unsupported(_))
        ));
    }

    #[test]
    fn test_validate_file_inputs() {
        assert!(matches!(
            validate_input(&VideoInput::File(PathBuf::from("/tmp/clip.avi"))),
            Err(TranscriptionError::Unsupported(_))
        ));
        assert!(matches!(
            validate_input(&VideoInput::File(PathBuf::from("/definitely/missing/clip.mp4"))),
            Err(TranscriptionError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = ServiceConfig {
            transcription_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..ServiceConfig::default()
        };
        let transcriber = HttpTranscriber::new(&config).unwrap();

        let err = transcriber
            .transcribe(&VideoInput::Url("https://youtu.be/abc".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::Network(_)));
    }
}
