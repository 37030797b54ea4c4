//! Maven Central documents
//!
//! Handles:
//! - The solrsearch response giving the latest version of an artifact
//! - The artifact POM, read with the quick-xml event API

use super::ProjectLicense;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(rename = "latestVersion")]
    latest_version: Option<String>,
}

/// Reads `response.docs[0].latestVersion` when at least one artifact matched
pub fn extract_latest_version(body: &str) -> Option<String> {
    let search: SearchResponse = serde_json::from_str(body).ok()?;
    if search.response.num_found < 1 {
        return None;
    }
    search
        .response
        .docs
        .into_iter()
        .next()?
        .latest_version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads `project/name` and the first `project/licenses/license/name`
pub fn extract_pom(body: &str) -> ProjectLicense {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut found = ProjectLicense::default();
    let mut path: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned());
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map(|t| t.trim().to_string()).unwrap_or_default();
                if !text.is_empty() {
                    match path.join("/").as_str() {
                        "project/name" if found.name.is_none() => found.name = Some(text),
                        "project/licenses/license/name" if found.license.is_none() => {
                            found.license = Some(text)
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    found
}
