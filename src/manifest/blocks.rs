//! Scoped block extraction for brace-delimited manifest formats
//!
//! Walks prepared lines, entering a section on a recognized head and leaving
//! it on a recognized foot. Inside a section, a line ending in `{` opens an
//! unlabeled nested section. Member lines of all nested sections are
//! flattened into one list; section boundaries are not kept.

use crate::domain::Platform;

/// Lines collected from the recognized sections of a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBlock {
    /// Member lines, in source order
    pub lines: Vec<String>,
    /// Deepest nesting level reached (1 for a single section)
    pub depth: usize,
    /// Index where scanning stopped
    pub end: usize,
}

/// Head and foot tokens delimiting the sections of one format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockExtractor {
    heads: &'static [&'static str],
    feet: &'static [&'static str],
}

impl BlockExtractor {
    /// Creates an extractor for the given head and foot tokens
    pub const fn new(heads: &'static [&'static str], feet: &'static [&'static str]) -> Self {
        Self { heads, feet }
    }

    /// Returns the extractor for a brace-delimited platform
    ///
    /// Flutter is scoped by indentation, Cargo and CocoaPods are read line
    /// by line; they have no extractor.
    pub fn for_platform(platform: Platform) -> Option<Self> {
        match platform {
            Platform::Gradle => Some(Self::new(&["dependencies {"], &["}", "},"])),
            Platform::Npm => Some(Self::new(
                &[
                    "\"peerDependencies\": {",
                    "\"devDependencies\": {",
                    "\"dependencies\": {",
                ],
                &["}", "},"],
            )),
            Platform::Go => Some(Self::new(&["require ("], &[")"])),
            Platform::Swift => Some(Self::new(&["dependencies: ["], &["]", "],"])),
            Platform::Cargo | Platform::Flutter | Platform::CocoaPods => None,
        }
    }

    /// Extracts the member lines of every recognized section
    ///
    /// A head without a matching foot is not an error: whatever was
    /// collected up to the end of input is returned.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> RawBlock {
        let mut block = RawBlock::default();
        let mut max_level = 1;
        block.end = self.walk(lines, 0, 1, &mut block.lines, &mut max_level);
        block.depth = max_level - 1;
        block
    }

    fn walk<S: AsRef<str>>(
        &self,
        lines: &[S],
        mut i: usize,
        level: usize,
        collected: &mut Vec<String>,
        max_level: &mut usize,
    ) -> usize {
        while i < lines.len() {
            let line = lines[i].as_ref();
            let opens = self.heads.contains(&line) || (level > 1 && line.ends_with('{'));

            if opens {
                *max_level = (*max_level).max(level + 1);
                i = self.walk(lines, i + 1, level + 1, collected, max_level);
                if i >= lines.len() {
                    break;
                }
            } else if level > 1 {
                if self.feet.contains(&line) {
                    return i;
                }
                collected.push(line.to_string());
            }
            i += 1;
        }
        i
    }
}
