// src/job_extraction/cleaner.rs
use super::rules::ExtractionRules;
use super::segmenter::HEADING_MARKER;

/// Clean newline-delimited description text.
///
/// Each line is normalized first, then dropped if it is empty, mentions the
/// brand, matches a noise pattern, or is too short. Heading lines skip the
/// length check. Running this on its own output changes nothing.
pub fn clean_description(text: &str, rules: &ExtractionRules) -> String {
    clean_lines(text.split('\n'), rules).join("\n")
}

pub fn clean_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    rules: &ExtractionRules,
) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| rules.normalize_line(line))
        .filter(|line| keep_line(line, rules))
        .collect()
}

fn keep_line(line: &str, rules: &ExtractionRules) -> bool {
    if line.is_empty() || rules.mentions_brand(line) || rules.is_noise(line) {
        return false;
    }
    is_heading(line) || line.chars().count() > rules.min_line_length()
}

fn is_heading(line: &str) -> bool {
    line.strip_prefix(HEADING_MARKER)
        .is_some_and(|title| !title.trim().is_empty())
}
