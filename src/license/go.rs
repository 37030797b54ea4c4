//! Go module pages
//!
//! Handles:
//! - pkg.go.dev: the license entry of the unit header
//! - github.com: the repository sidebar link marked with the law icon
//!
//! Both fall back to the generic heading scan.

use super::html::{collapse_whitespace, element_text, heading_license};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static PKG_LICENSE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[data-test-id="UnitHeader-licenses"] a"#).unwrap());

static PKG_LICENSE_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[data-test-id="UnitHeader-licenses"]"#).unwrap());

static LAW_ICON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("svg.octicon-law").unwrap());

/// License shown on a pkg.go.dev module page
pub fn extract_pkg_go_dev_license(body: &str) -> Option<String> {
    let document = Html::parse_document(body);

    let header = document
        .select(&PKG_LICENSE_LINK)
        .map(|link| element_text(&link))
        .find(|text| !text.is_empty())
        .or_else(|| {
            document
                .select(&PKG_LICENSE_ITEM)
                .map(|item| strip_label(&element_text(&item)))
                .find(|text| !text.is_empty())
        });

    header.or_else(|| heading_license(&document))
}

/// License shown in the sidebar of a github.com repository page
pub fn extract_github_page_license(body: &str) -> Option<String> {
    let document = Html::parse_document(body);

    let sidebar = document
        .select(&LAW_ICON)
        .filter_map(|icon| icon.parent().and_then(ElementRef::wrap))
        .map(|parent| element_text(&parent))
        .find(|text| !text.is_empty());

    sidebar.or_else(|| heading_license(&document))
}

/// Removes a leading `License:` label
fn strip_label(text: &str) -> String {
    let trimmed = text.trim();
    let rest = match trimmed.get(..8) {
        Some(prefix) if prefix.eq_ignore_ascii_case("license:") => &trimmed[8..],
        _ => trimmed,
    };
    collapse_whitespace(rest)
}
