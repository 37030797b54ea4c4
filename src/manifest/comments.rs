//! Comment stripping for raw manifest lines
//!
//! Lines whose trimmed text starts with a line-comment marker are dropped.
//! Block comments may span lines; the text before the opener and after the
//! closer is kept on a single line, and a line left empty is dropped.

use crate::domain::Platform;
use crate::error::ManifestError;

/// Comment markers recognized in a manifest format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Markers that comment out a whole line when it starts with them
    pub line_markers: &'static [&'static str],
    /// Block comment opener and closer
    pub block: Option<(&'static str, &'static str)>,
}

impl CommentSyntax {
    /// Every marker the stripper knows about
    pub const ALL: CommentSyntax = CommentSyntax {
        line_markers: &["#", "//"],
        block: Some(("/*", "*/")),
    };

    /// Formats without comments (JSON)
    pub const NONE: CommentSyntax = CommentSyntax {
        line_markers: &[],
        block: None,
    };

    /// Hash-prefixed comments (TOML, YAML, Ruby)
    pub const HASH: CommentSyntax = CommentSyntax {
        line_markers: &["#"],
        block: None,
    };

    /// C-style comments (Gradle, Swift, Go)
    pub const C_STYLE: CommentSyntax = CommentSyntax {
        line_markers: &["//"],
        block: Some(("/*", "*/")),
    };

    /// Returns the syntax used by a platform's manifest format
    pub fn for_platform(platform: Platform) -> CommentSyntax {
        match platform {
            Platform::Npm => CommentSyntax::NONE,
            Platform::Cargo | Platform::Flutter | Platform::CocoaPods => CommentSyntax::HASH,
            Platform::Gradle | Platform::Swift | Platform::Go => CommentSyntax::C_STYLE,
        }
    }

    fn is_line_comment(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.line_markers.iter().any(|m| trimmed.starts_with(m))
    }
}

impl Default for CommentSyntax {
    fn default() -> Self {
        CommentSyntax::ALL
    }
}

/// Removes comments from manifest lines, preserving the order of what remains
///
/// # Errors
///
/// Returns `ManifestError::UnterminatedComment` when a block comment has no
/// closer before the end of input.
pub fn strip_comments<S: AsRef<str>>(
    lines: &[S],
    syntax: &CommentSyntax,
) -> Result<Vec<String>, ManifestError> {
    let mut result = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_ref();
        if syntax.is_line_comment(line) {
            i += 1;
            continue;
        }

        let Some((opener, closer)) = syntax.block else {
            result.push(line.to_string());
            i += 1;
            continue;
        };

        let mut kept = String::new();
        let mut rest = line.to_string();
        while let Some(start) = rest.find(opener) {
            kept.push_str(&rest[..start]);
            let opened_at = i;
            let mut tail = rest[start + opener.len()..].to_string();
            loop {
                if let Some(end) = tail.find(closer) {
                    rest = tail[end + closer.len()..].trim_start().to_string();
                    break;
                }
                i += 1;
                match lines.get(i) {
                    Some(next) => tail = next.as_ref().to_string(),
                    None => return Err(ManifestError::unterminated_comment(opened_at + 1)),
                }
            }
            kept.truncate(kept.trim_end().len());
            if !kept.trim().is_empty() && !rest.is_empty() {
                kept.push(' ');
            }
        }
        kept.push_str(&rest);

        if !kept.trim().is_empty() {
            result.push(kept.trim_end().to_string());
        }
        i += 1;
    }

    Ok(result)
}
