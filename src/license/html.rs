//! Generic HTML license scan
//!
//! For each heading level from 1 to 10, the first heading whose text
//! contains "license" (case-insensitive) is located and the text of its next
//! element sibling is taken. Matches are accumulated across levels; a match
//! already contained in the collected text is skipped.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// `h1` to `h10`, in level order
static HEADING_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    (1..=10)
        .map(|level| Selector::parse(&format!("h{}", level)).unwrap())
        .collect()
});

const SEPARATOR: &str = "; ";

/// Extracts the license text following license headings
pub fn extract_heading_license(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    heading_license(&document)
}

pub(super) fn heading_license(document: &Html) -> Option<String> {
    let mut collected = String::new();

    for selector in HEADING_SELECTORS.iter() {
        let Some(text) = document
            .select(selector)
            .find(|heading| element_text(heading).to_lowercase().contains("license"))
            .and_then(next_element_text)
        else {
            continue;
        };

        if collected.to_lowercase().contains(&text.to_lowercase()) {
            continue;
        }
        if !collected.is_empty() {
            collected.push_str(SEPARATOR);
        }
        collected.push_str(&text);
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected)
    }
}

/// Text of the nearest following sibling that is an element
fn next_element_text(heading: ElementRef<'_>) -> Option<String> {
    let sibling = heading.next_siblings().find_map(ElementRef::wrap)?;
    let text = element_text(&sibling);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub(super) fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Trims and collapses runs of whitespace into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
