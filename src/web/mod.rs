// src/web/mod.rs
pub mod types;

pub use types::*;

use crate::analysis::{AnalysisResponse, JobAnalyzer};
use crate::core::ConfigManager;
use crate::job_extraction::{JobRecord, JobScraper};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/scrape", data = "<request>")]
pub async fn scrape_job(request: Json<ScrapeRequest>, state: &State<AppState>) -> Json<JobRecord> {
    info!("Scrape requested for {}", request.job_url);
    Json(state.scraper.scrape(&request.job_url).await)
}

#[post("/analyze", data = "<request>")]
pub async fn analyze_job(
    request: Json<AnalyzeJobRequest>,
    state: &State<AppState>,
) -> Json<AnalysisResponse> {
    info!("Analysis requested for {}", request.job_url);
    Json(state.analyzer.analyze(request.into_inner().into()).await)
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request JSON format",
            "Verify all required fields are present",
        ],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be understood",
        "UNPROCESSABLE_ENTITY",
        &["job_url is required and must be a string"],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        &["Try again in a few moments"],
    ))
}

pub fn build_rocket(state: AppState, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount(
            "/api",
            routes![scrape_job, analyze_job, health, options],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let state = AppState {
        scraper: JobScraper::new(&config.scraper)?,
        analyzer: JobAnalyzer::from_config(&config)?,
    };

    info!("Starting job post analyzer API on port {}", config.server.port);
    info!("Transcription service: {}", config.services.transcription_url);
    info!("Generation service: {}", config.services.generation_url);

    build_rocket(state, config.server.port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Generator, JobPostSource, SourceDocument, Transcriber};
    use crate::analysis::{TranscriptionError, VideoInput};
    use crate::analysis::generation::ProposalRequest;
    use crate::core::config_manager::ScraperConfig;
    use crate::job_extraction::JobPost;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;
    use std::sync::Arc;

    struct StaticJob;

    #[async_trait::async_trait]
    impl JobPostSource for StaticJob {
        async fn fetch_job(&self, _url: &str) -> JobRecord {
            JobRecord::Success(JobPost {
                title: "Data Engineer".to_string(),
                description: "## Scope\n- Build the nightly warehouse load in Rust".to_string(),
                links: vec![],
                documents: vec![],
            })
        }
    }

    struct NoTranscripts;

    #[async_trait::async_trait]
    impl Transcriber for NoTranscripts {
        async fn transcribe(&self, _input: &VideoInput) -> Result<String, TranscriptionError> {
            Err(TranscriptionError::Unsupported("disabled".to_string()))
        }
    }

    struct EchoGenerator;

    #[async_trait::async_trait]
    impl Generator for EchoGenerator {
        async fn analyze(&self, documents: &[SourceDocument], _query: &str) -> Result<String> {
            Ok(format!("{} documents", documents.len()))
        }

        async fn draft_proposal(&self, request: &ProposalRequest) -> Result<String> {
            Ok(format!("Proposal for {}", request.job_title))
        }
    }

    async fn client() -> Client {
        let config = ScraperConfig {
            timeout_secs: 1,
            max_retries: 0,
            ..ScraperConfig::default()
        };
        let state = AppState {
            scraper: JobScraper::new(&config).unwrap(),
            analyzer: JobAnalyzer::new(
                Arc::new(StaticJob),
                Arc::new(NoTranscripts),
                Arc::new(EchoGenerator),
            ),
        };
        Client::tracked(build_rocket(state, 0)).await.unwrap()
    }

    #[rocket::async_test]
    async fn test_health() {
        let client = client().await;
        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: HealthResponse = response.into_json().await.unwrap();
        assert!(body.success);
    }

    #[rocket::async_test]
    async fn test_scrape_invalid_url_returns_error_record() {
        let client = client().await;
        let response = client
            .post("/api/scrape")
            .header(ContentType::JSON)
            .body(r#"{"job_url":"not a url"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let record: JobRecord = response.into_json().await.unwrap();
        assert!(record.error().unwrap().contains("Invalid job post URL"));
    }

    #[rocket::async_test]
    async fn test_analyze_soft_fails_video() {
        let client = client().await;
        let response = client
            .post("/api/analyze")
            .header(ContentType::JSON)
            .body(r#"{"job_url":"https://example.com/job","video_url":"https://youtu.be/x","tone":"technical"}"#)
            .dispatch()
            .await;

        let body: AnalysisResponse = response.into_json().await.unwrap();
        assert!(body.success);
        assert_eq!(body.analysis.as_deref(), Some("1 documents"));
        assert_eq!(body.proposal.as_deref(), Some("Proposal for Data Engineer"));
        assert_eq!(body.warnings.len(), 1);
    }

    #[rocket::async_test]
    async fn test_missing_job_url_is_rejected() {
        let client = client().await;
        let response = client
            .post("/api/analyze")
            .header(ContentType::JSON)
            .body(r#"{"video_url":"https://youtu.be/x"}"#)
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: StandardErrorResponse = response.into_json().await.unwrap();
        assert_eq!(body.error_code, "UNPROCESSABLE_ENTITY");
    }
}
