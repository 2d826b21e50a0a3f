// src/job_extraction/segmenter.rs
use super::structure::element_text;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static CONTENT_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, p, ul, ol, a").expect("valid block selector"));
static LIST_ITEMS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid list item selector"));

pub const HEADING_MARKER: &str = "## ";
pub const BULLET_MARKER: &str = "- ";

/// Ordered text segments of the main content plus the anchor targets met along the way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SegmentedContent {
    pub segments: Vec<String>,
    pub hrefs: Vec<String>,
}

impl SegmentedContent {
    pub fn raw_description(&self) -> String {
        self.segments.join("\n")
    }
}

/// Walk headings, lists, paragraphs and anchors of `main` in document order.
///
/// Paragraph text is kept only when longer than `min_text_length` characters;
/// headings and list items are kept regardless of length.
pub fn segment(main: ElementRef<'_>, min_text_length: usize) -> SegmentedContent {
    let mut content = SegmentedContent::default();

    for element in main.select(&CONTENT_BLOCKS) {
        match element.value().name() {
            "h2" | "h3" => {
                let text = element_text(&element);
                if !text.is_empty() {
                    content.segments.push(format!("\n{}{}", HEADING_MARKER, text));
                }
            }
            "ul" | "ol" => {
                let items: Vec<String> = element
                    .select(&LIST_ITEMS)
                    .map(|li| format!("{}{}", BULLET_MARKER, element_text(&li)))
                    .collect();
                if !items.is_empty() {
                    content.segments.push(items.join("\n"));
                }
            }
            "a" => {
                if let Some(href) = element.value().attr("href") {
                    content.hrefs.push(href.trim().to_string());
                }
            }
            _ => {
                let text = element_text(&element);
                if text.chars().count() > min_text_length {
                    content.segments.push(text);
                }
            }
        }
    }

    content
}
