// src/job_extraction/rules.rs
//! Immutable extraction rules, compiled once from `ScraperConfig`

use crate::core::config_manager::ScraperConfig;
use anyhow::{Context, Result};
use regex::{Regex, RegexSet, RegexSetBuilder};

#[derive(Debug, Clone)]
pub struct ExtractionRules {
    noise: RegexSet,
    tooltip: Regex,
    whitespace: Regex,
    excluded_domains: Vec<String>,
    brand_name: String,
    document_extensions: Vec<String>,
    min_line_length: usize,
}

impl ExtractionRules {
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let noise = RegexSetBuilder::new(&config.noise_patterns)
            .case_insensitive(true)
            .build()
            .context("Failed to compile noise patterns")?;

        let tooltip = Regex::new(r"Close the tooltip.*?\.\s*")
            .context("Failed to compile tooltip pattern")?;
        let whitespace = Regex::new(r"\s{2,}").context("Failed to compile whitespace pattern")?;

        Ok(Self {
            noise,
            tooltip,
            whitespace,
            excluded_domains: config
                .excluded_domains
                .iter()
                .map(|d| d.trim().trim_start_matches('.').to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            brand_name: config.brand_name.clone(),
            document_extensions: config
                .document_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            min_line_length: config.min_line_length,
        })
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.noise.is_match(line)
    }

    pub fn mentions_brand(&self, line: &str) -> bool {
        !self.brand_name.is_empty() && line.contains(&self.brand_name)
    }

    /// Host equals an excluded domain or is one of its subdomains.
    pub fn is_excluded_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_lowercase();
        self.excluded_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn is_document_path(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        self.document_extensions
            .iter()
            .any(|ext| path.ends_with(&format!(".{}", ext)))
    }

    pub fn min_line_length(&self) -> usize {
        self.min_line_length
    }

    /// Strip tooltip artifacts, collapse whitespace runs and trim, repeated
    /// until the line stops changing. Collapsing can expose a new artifact.
    pub fn normalize_line(&self, line: &str) -> String {
        let mut text = line.to_string();
        loop {
            let stripped = self.tooltip.replace_all(&text, "");
            let next = self.whitespace.replace_all(&stripped, " ").trim().to_string();
            if next == text {
                return next;
            }
            text = next;
        }
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        // Built-in patterns are constant and covered by tests
        Self::from_config(&ScraperConfig::default()).expect("default extraction rules compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_host_matches_domain_and_subdomains() {
        let rules = ExtractionRules::default();
        assert!(rules.is_excluded_host("upwork.com"));
        assert!(rules.is_excluded_host("www.upwork.com"));
        assert!(rules.is_excluded_host("community.upwork.com"));
        assert!(rules.is_excluded_host("UPWORK.COM"));
        assert!(!rules.is_excluded_host("notupwork.com"));
        assert!(!rules.is_excluded_host("example.com"));
    }

    #[test]
    fn test_document_path() {
        let rules = ExtractionRules::default();
        assert!(rules.is_document_path("/files/brief.PDF"));
        assert!(rules.is_document_path("/a/budget.xlsx"));
        assert!(!rules.is_document_path("/a/readme.txt"));
        assert!(!rules.is_document_path("/pdf"));
    }

    #[test]
    fn test_noise_patterns() {
        let rules = ExtractionRules::default();
        assert!(rules.is_noise("Proposals: 5"));
        assert!(rules.is_noise("Budget $1,500.00 fixed"));
        assert!(rules.is_noise("last viewed by client: 2 hours ago"));
        assert!(rules.is_noise("12 hires in the past year"));
        assert!(rules.is_noise("- HourlyRate"));
        assert!(!rules.is_noise("- build a distributed ingestion service in Rust"));
        assert!(!rules.is_noise("- Experience with distributed systems and Kubernetes"));
    }

    #[test]
    fn test_normalize_line() {
        let rules = ExtractionRules::default();
        assert_eq!(
            rules.normalize_line("  Close the tooltip. Build   a\tparser  "),
            "Build a\tparser"
        );
        assert_eq!(
            rules.normalize_line("Close the Close the tooltip. tooltip. rest"),
            "rest"
        );
        assert_eq!(
            rules.normalize_line("Close the  tooltip. Deliver the prototype"),
            "Deliver the prototype"
        );
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let config = ScraperConfig {
            noise_patterns: vec!["(unclosed".to_string()],
            ..ScraperConfig::default()
        };
        assert!(ExtractionRules::from_config(&config).is_err());
    }
}
