//! GitHub repository search response

use super::ProjectLicense;
use serde::Deserialize;

/// Searches matching more repositories than this are too vague to trust
pub const MAX_TOTAL_COUNT: u64 = 500_000;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total_count: u64,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    name: Option<String>,
    license: Option<SearchLicense>,
}

#[derive(Debug, Deserialize)]
struct SearchLicense {
    name: Option<String>,
}

/// Reads the name and license of the best search hit
pub fn extract_github_search(body: &str) -> ProjectLicense {
    let response: SearchResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(_) => return ProjectLicense::default(),
    };

    if response.total_count > MAX_TOTAL_COUNT {
        return ProjectLicense::default();
    }

    let Some(item) = response.items.into_iter().next() else {
        return ProjectLicense::default();
    };

    ProjectLicense {
        name: item.name.map(|n| n.trim().to_string()),
        license: item
            .license
            .and_then(|l| l.name)
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    }
}
