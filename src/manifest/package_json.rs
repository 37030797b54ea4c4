//! package.json parser for Node.js projects
//!
//! Reads the `dependencies`, `devDependencies` and `peerDependencies`
//! objects line by line. The version value is not kept.

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::{BlockExtractor, ManifestParser};

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parses one `"name": "version"` member line
    pub fn parse_line(line: &str) -> Option<ManifestDependency> {
        let (name, value) = line.split_once(':')?;
        let name = name.trim();
        let value = value.trim().trim_end_matches(',').trim_end();

        if !is_quoted(name) || !is_quoted(value) {
            return None;
        }

        let component = &name[1..name.len() - 1];
        if component.is_empty() {
            return None;
        }
        Some(ManifestDependency::new(component))
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

impl ManifestParser for PackageJsonParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        let Some(extractor) = BlockExtractor::for_platform(Platform::Npm) else {
            return Vec::new();
        };
        extractor
            .extract(lines)
            .lines
            .iter()
            .filter_map(|line| Self::parse_line(line))
            .collect()
    }

    fn platform(&self) -> Platform {
        Platform::Npm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::prepare_lines;

    fn parse(content: &str) -> Vec<ManifestDependency> {
        let lines = prepare_lines(Platform::Npm, content).unwrap();
        PackageJsonParser.parse(&lines)
    }

    #[test]
    fn test_parse_simple_dependencies() {
        let content = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "dependencies": {
    "lodash": "^4.17.21",
    "express": "~4.18.2"
  },
  "devDependencies": {
    "typescript": "^5.0.0"
  },
  "peerDependencies": {
    "react": ">=18"
  }
}"#;
        let deps = parse(content);
        let names: Vec<_> = deps.iter().map(|d| d.component.as_str()).collect();
        assert_eq!(names, vec!["lodash", "express", "typescript", "react"]);
    }

    #[test]
    fn test_top_level_fields_ignored() {
        let content = r#"{
  "name": "my-app",
  "scripts": {
    "build": "tsc"
  }
}"#;
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_scoped_package() {
        let dep = PackageJsonParser::parse_line("\"@types/node\": \"^20.0.0\",").unwrap();
        assert_eq!(dep.component, "@types/node");
    }

    #[test]
    fn test_value_with_colon_kept_whole() {
        let dep = PackageJsonParser::parse_line("\"alias\": \"npm:real-pkg@1.0.0\"").unwrap();
        assert_eq!(dep.component, "alias");
    }

    #[test]
    fn test_unquoted_sides_rejected() {
        assert!(PackageJsonParser::parse_line("lodash: \"^4\"").is_none());
        assert!(PackageJsonParser::parse_line("\"lodash\": 4").is_none());
        assert!(PackageJsonParser::parse_line("\"nested\": {").is_none());
        assert!(PackageJsonParser::parse_line("no separator").is_none());
    }

    #[test]
    fn test_platform() {
        assert_eq!(PackageJsonParser.platform(), Platform::Npm);
    }
}
