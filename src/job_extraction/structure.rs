// src/job_extraction/structure.rs
//! Title and main-content lookup over a parsed page

use super::types::TITLE_NOT_FOUND;
use scraper::{ElementRef, Html};

type ElementPredicate = fn(&ElementRef) -> bool;

/// Title candidates in priority order; the first non-empty match wins.
const TITLE_TAGS: &[&str] = &["h1", "h2", "h4"];

/// Main-content strategies in priority order; the first match wins.
const MAIN_CONTENT_STRATEGIES: &[(&str, ElementPredicate)] = &[
    ("role=main", has_main_role),
    ("<main>", is_main_element),
    ("class*=description", has_description_class),
    ("<article>", is_article_element),
];

fn has_main_role(element: &ElementRef) -> bool {
    element
        .value()
        .attr("role")
        .is_some_and(|role| role.trim().eq_ignore_ascii_case("main"))
}

fn is_main_element(element: &ElementRef) -> bool {
    element.value().name() == "main"
}

fn has_description_class(element: &ElementRef) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|class| class.to_lowercase().contains("description"))
}

fn is_article_element(element: &ElementRef) -> bool {
    element.value().name() == "article"
}

fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.root_element().descendants().filter_map(ElementRef::wrap)
}

/// Text of an element with each text node trimmed and empty nodes dropped.
pub fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn find_title(document: &Html) -> String {
    TITLE_TAGS
        .iter()
        .find_map(|tag| {
            elements(document)
                .filter(|element| element.value().name() == *tag)
                .map(|element| element_text(&element))
                .find(|text| !text.is_empty())
        })
        .unwrap_or_else(|| TITLE_NOT_FOUND.to_string())
}

pub fn find_main_content(document: &Html) -> Option<ElementRef<'_>> {
    MAIN_CONTENT_STRATEGIES
        .iter()
        .find_map(|(name, matches)| {
            let found = elements(document).find(|element| matches(element));
            if found.is_some() {
                tracing::debug!("Main content located via {}", name);
            }
            found
        })
}
