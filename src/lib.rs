// src/lib.rs
pub mod analysis;
pub mod cli;
pub mod core;
pub mod job_extraction;
pub mod utils;
pub mod web;

pub use analysis::{AnalysisRequest, AnalysisResponse, JobAnalyzer};
pub use job_extraction::{JobPost, JobRecord, JobScraper};
pub use web::start_web_server;
