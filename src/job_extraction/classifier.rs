// src/job_extraction/classifier.rs
use super::error::ClassificationError;
use super::rules::ExtractionRules;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static TEXT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s'"<>]+"#).expect("valid url pattern"));
static RAW_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid raw url pattern"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', '-', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlClass {
    Document,
    Link,
    Excluded,
    /// Relative, mailto, javascript and other non-web targets
    Ignored,
}

pub fn trim_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches(TRAILING_PUNCTUATION)
}

fn is_web_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Classify one absolute URL. Malformed web URLs are reported, not guessed at.
pub fn classify(url: &str, rules: &ExtractionRules) -> Result<UrlClass, ClassificationError> {
    if !is_web_url(url) {
        return Ok(UrlClass::Ignored);
    }

    let parsed = Url::parse(url).map_err(|e| ClassificationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ClassificationError::MissingHost(url.to_string()))?;

    if rules.is_excluded_host(host) {
        Ok(UrlClass::Excluded)
    } else if rules.is_document_path(parsed.path()) {
        Ok(UrlClass::Document)
    } else {
        Ok(UrlClass::Link)
    }
}

/// Deduplicated, disjoint link and document buckets in first-seen order.
#[derive(Debug, Default)]
pub struct UrlBuckets {
    pub links: Vec<String>,
    pub documents: Vec<String>,
    seen: HashSet<String>,
}

impl UrlBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, raw: &str, rules: &ExtractionRules) {
        let url = trim_trailing_punctuation(raw.trim());
        if self.seen.contains(url) {
            return;
        }

        let class = match classify(url, rules) {
            Ok(class) => class,
            Err(e) => {
                debug!("Excluding unclassifiable URL: {}", e);
                UrlClass::Excluded
            }
        };

        match class {
            UrlClass::Document => self.documents.push(url.to_string()),
            UrlClass::Link => self.links.push(url.to_string()),
            UrlClass::Excluded | UrlClass::Ignored => return,
        }
        self.seen.insert(url.to_string());
    }

    pub fn extend<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>, rules: &ExtractionRules) {
        for url in urls {
            self.add(url, rules);
        }
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.links, self.documents)
    }
}

/// Absolute URLs embedded in plain text, without trailing prose punctuation.
pub fn find_text_urls(text: &str) -> Vec<&str> {
    TEXT_URL
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', '-']))
        .collect()
}

pub fn contains_urls(text: &str) -> bool {
    RAW_URL.is_match(text)
}

pub fn strip_urls(text: &str) -> String {
    RAW_URL.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let rules = ExtractionRules::default();
        assert_eq!(
            classify("https://example.com/brief.pdf", &rules),
            Ok(UrlClass::Document)
        );
        assert_eq!(
            classify("https://example.com/brief.pdf?download=1", &rules),
            Ok(UrlClass::Document)
        );
        assert_eq!(classify("https://github.com/acme/repo", &rules), Ok(UrlClass::Link));
        assert_eq!(classify("https://upwork.com/help", &rules), Ok(UrlClass::Excluded));
        assert_eq!(
            classify("https://support.upwork.com/article.pdf", &rules),
            Ok(UrlClass::Excluded)
        );
        assert_eq!(classify("/jobs/123", &rules), Ok(UrlClass::Ignored));
        assert_eq!(classify("mailto:hr@example.com", &rules), Ok(UrlClass::Ignored));
        assert!(classify("http://", &rules).is_err());
    }

    #[test]
    fn test_buckets_dedup_trailing_punctuation() {
        let rules = ExtractionRules::default();
        let mut buckets = UrlBuckets::new();
        buckets.extend(
            [
                "https://x.com/doc.pdf.",
                "https://x.com/doc.pdf",
                "https://x.com/about),",
                "https://x.com/about",
            ],
            &rules,
        );

        let (links, documents) = buckets.into_parts();
        assert_eq!(documents, vec!["https://x.com/doc.pdf".to_string()]);
        assert_eq!(links, vec!["https://x.com/about".to_string()]);
    }

    #[test]
    fn test_malformed_urls_are_excluded() {
        let rules = ExtractionRules::default();
        let mut buckets = UrlBuckets::new();
        buckets.extend(["http://[broken", "https://", "https://ok.example.org"], &rules);

        let (links, documents) = buckets.into_parts();
        assert_eq!(links, vec!["https://ok.example.org".to_string()]);
        assert!(documents.is_empty());
    }

    #[test]
    fn test_find_text_urls() {
        let text = "See https://example.com/a, and \"https://example.com/b.pdf\". Also http://x.io/c-";
        assert_eq!(
            find_text_urls(text),
            vec![
                "https://example.com/a",
                "https://example.com/b.pdf",
                "http://x.io/c"
            ]
        );
    }

    #[test]
    fn test_strip_urls() {
        assert_eq!(
            strip_urls("Mockups at https://figma.com/file/abc. Thanks"),
            "Mockups at  Thanks"
        );
    }
}
