//! pubspec.yaml parser for Flutter / Dart projects
//!
//! Scoped by indentation rather than braces: a `dependencies:` or
//! `dev_dependencies:` head opens a section that lasts until the next blank
//! or non-indented line. Only entries at the section's minimum indent are
//! dependencies; deeper lines are sub-keys (`sdk:`, `git:`, `path:`).

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::ManifestParser;

/// Parser for pubspec.yaml files
pub struct PubspecYamlParser;

const HEADS: &[&str] = &["dependencies:", "dev_dependencies:"];

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Accepts an empty version, a `$` reference, or digits once `^ . +` and spaces are removed
fn is_accepted_version(version: &str) -> bool {
    if version.is_empty() || version.contains('$') {
        return true;
    }
    version
        .chars()
        .filter(|c| !matches!(c, '^' | '.' | '+' | ' '))
        .all(|c| c.is_ascii_digit())
}

impl PubspecYamlParser {
    /// Splits raw lines into the member lines of each recognized section
    pub fn sections(lines: &[String]) -> Vec<Vec<&str>> {
        let mut sections = Vec::new();
        let mut current: Option<Vec<&str>> = None;

        for line in lines {
            if line.trim().is_empty() {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                continue;
            }
            if indent_width(line) == 0 {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                if HEADS.contains(&line.trim_end()) {
                    current = Some(Vec::new());
                }
                continue;
            }
            if let Some(section) = current.as_mut() {
                section.push(line.as_str());
            }
        }
        if let Some(done) = current {
            sections.push(done);
        }

        sections
    }

    /// Extracts top-level entries from one section
    pub fn parse_section(section: &[&str]) -> Vec<ManifestDependency> {
        let Some(min_indent) = section.iter().map(|l| indent_width(l)).min() else {
            return Vec::new();
        };

        section
            .iter()
            .filter(|line| {
                line[min_indent..]
                    .chars()
                    .next()
                    .is_some_and(|c| c != ' ' && c != '\t')
            })
            .filter_map(|line| {
                let (name, version) = line.trim().split_once(':')?;
                let name = name.trim();
                if name.is_empty() || !is_accepted_version(version.trim()) {
                    return None;
                }
                Some(ManifestDependency::new(name))
            })
            .collect()
    }
}

impl ManifestParser for PubspecYamlParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        Self::sections(lines)
            .iter()
            .flat_map(|section| Self::parse_section(section))
            .collect()
    }

    fn platform(&self) -> Platform {
        Platform::Flutter
    }
}
