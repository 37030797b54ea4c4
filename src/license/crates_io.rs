//! crates.io crate document
//!
//! The JSON is scanned as text: the first `license` key followed by a
//! string value gives the license. No full JSON parse is done.

/// Returns the value between the second and third double quotes after `license`
pub fn extract_crates_io_license(body: &str) -> Option<String> {
    body.match_indices("license")
        .find_map(|(p, key)| string_value_after(&body[p + key.len()..]))
}

/// Reads `": "value"` right after a key, rejecting non-string values
fn string_value_after(rest: &str) -> Option<String> {
    let rest = rest.strip_prefix('"')?;
    let rest = rest.trim_start().strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    let license = rest[..end].trim();
    if license.is_empty() {
        None
    } else {
        Some(license.to_string())
    }
}
