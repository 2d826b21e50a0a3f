// src/core/service_client.rs
//! JSON/multipart HTTP client shared by the transcription and generation collaborators

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::{error, trace};

#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ServiceClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// POST a JSON payload and decode a JSON response
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(endpoint);
        trace!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        Self::decode(response).await
    }

    /// Upload a file as multipart form data and decode a JSON response
    pub async fn post_file<R>(&self, endpoint: &str, field: &str, file_path: &Path) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(endpoint);
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let file_content = tokio::fs::read(file_path)
            .await
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let form = Form::new().part(
            field.to_string(),
            Part::bytes(file_content).file_name(file_name),
        );

        trace!("POST multipart {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to upload to {}", url))?;

        Self::decode(response).await
    }

    async fn decode<R>(response: reqwest::Response) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Service error response {}: {}", status, error_text);
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ServiceClient::new("http://localhost:5555/", None, 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5555");
        assert_eq!(client.endpoint("/analyze"), "http://localhost:5555/analyze");
    }
}
