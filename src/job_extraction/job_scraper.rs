// src/job_extraction/job_scraper.rs
use super::classifier::{contains_urls, find_text_urls, strip_urls, UrlBuckets};
use super::cleaner::clean_description;
use super::error::ScrapeError;
use super::fetcher::PageFetcher;
use super::rules::ExtractionRules;
use super::segmenter::segment;
use super::structure::{find_main_content, find_title};
use super::types::{JobPost, JobRecord};
use crate::core::config_manager::ScraperConfig;
use anyhow::Result;
use scraper::Html;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

#[derive(Clone)]
pub struct JobScraper {
    fetcher: PageFetcher,
    rules: Arc<ExtractionRules>,
}

impl JobScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let rules = Arc::new(ExtractionRules::from_config(config)?);
        let fetcher = PageFetcher::new(config)?;
        Ok(Self::with_parts(fetcher, rules))
    }

    pub fn with_parts(fetcher: PageFetcher, rules: Arc<ExtractionRules>) -> Self {
        Self { fetcher, rules }
    }

    /// Scrape one job post. Failures come back as a `JobRecord::Failure`, never as a panic or error.
    pub async fn scrape(&self, url: &str) -> JobRecord {
        info!("Fetching job post: {}", url);

        let record = JobRecord::from(self.try_scrape(url).await);
        match &record {
            JobRecord::Success(post) => info!(
                "Successfully extracted job: {} ({} links, {} documents)",
                post.title,
                post.links.len(),
                post.documents.len()
            ),
            JobRecord::Failure(failure) => {
                error!("Job post scraping failed for {}: {}", url, failure.error)
            }
        }
        record
    }

    /// Scrape several posts concurrently. Records come back in input order.
    pub async fn scrape_many(&self, urls: &[String]) -> Vec<JobRecord> {
        let mut tasks = JoinSet::new();
        for (index, url) in urls.iter().enumerate() {
            let scraper = self.clone();
            let url = url.clone();
            tasks.spawn(async move { (index, scraper.scrape(&url).await) });
        }

        let mut records: Vec<Option<JobRecord>> = vec![None; urls.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, record)) => records[index] = Some(record),
                Err(e) => error!("Scrape task failed: {}", e),
            }
        }

        records
            .into_iter()
            .map(|record| {
                record.unwrap_or_else(|| {
                    JobRecord::from(Err::<JobPost, _>(ScrapeError::Unknown(
                        "scrape task aborted".to_string(),
                    )))
                })
            })
            .collect()
    }

    async fn try_scrape(&self, url: &str) -> Result<JobPost, ScrapeError> {
        let html = self.fetcher.fetch(url).await?;

        let rules = Arc::clone(&self.rules);
        tokio::task::spawn_blocking(move || extract_job_post(&html, &rules))
            .await
            .map_err(|e| ScrapeError::Unknown(e.to_string()))?
    }
}

/// Turn a fetched page into a `JobPost`.
pub fn extract_job_post(html: &str, rules: &ExtractionRules) -> Result<JobPost, ScrapeError> {
    let document = Html::parse_document(html);

    let title = find_title(&document);
    let main = find_main_content(&document).ok_or(ScrapeError::Structure)?;
    let content = segment(main, rules.min_line_length());
    let raw_description = content.raw_description();

    let mut buckets = UrlBuckets::new();
    buckets.extend(content.hrefs.iter().map(String::as_str), rules);
    let text = take_text_urls(&raw_description, rules, &mut buckets);
    let (links, documents) = buckets.into_parts();

    let description = clean_description(&text, rules);

    Ok(JobPost {
        title,
        description,
        links,
        documents,
    })
}

/// Move in-text URLs into the buckets and out of the text.
///
/// Lines are normalized before each scan, since removing a tooltip or a URL
/// can join fragments into a new URL.
fn take_text_urls(raw: &str, rules: &ExtractionRules, buckets: &mut UrlBuckets) -> String {
    let mut text = normalize_lines(raw, rules);
    while contains_urls(&text) {
        buckets.extend(find_text_urls(&text), rules);
        text = normalize_lines(&strip_urls(&text), rules);
    }
    text
}

fn normalize_lines(text: &str, rules: &ExtractionRules) -> String {
    text.split('\n')
        .map(|line| rules.normalize_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}
