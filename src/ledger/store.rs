//! Persisted license and error files
//!
//! One pair of files per platform in the output directory:
//! - `licenses_<platform>.txt`: a comment header, then `Date:` sections of
//!   license lines
//! - `errors_<platform>.txt`: `Date:` sections of `error code=` lines
//!
//! Each save appends a new dated section after the retained history.
//! Identities handled again in the current run are removed from older
//! sections first, and sections left empty disappear. Files are replaced
//! through a `.old` rotation: rename, write, delete the backup.

use crate::domain::{ErrorRecord, LicenseRecord, Platform};
use crate::error::IoError;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// First line of every license file
pub const LICENSES_HEADER: &str =
    "# If the license is at None, or not clear, you are invited to search in the downloaded file.";

/// Format of the run date written after `Date: `
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_PREFIX: &str = "Date: ";
const BACKUP_SUFFIX: &str = ".old";

/// A dated group of lines
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    date: Option<String>,
    lines: Vec<String>,
}

/// Reads and writes the per-platform ledger files
#[derive(Debug, Clone)]
pub struct LedgerStore {
    output_dir: PathBuf,
}

impl LedgerStore {
    /// Create a store writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the license file of a platform
    pub fn licenses_path(&self, platform: Platform) -> PathBuf {
        self.output_dir
            .join(format!("licenses_{}.txt", platform.key()))
    }

    /// Path of the error file of a platform
    pub fn errors_path(&self, platform: Platform) -> PathBuf {
        self.output_dir.join(format!("errors_{}.txt", platform.key()))
    }

    /// Error records left by previous runs, in file order
    pub fn read_previous_errors(&self, platform: Platform) -> Result<Vec<ErrorRecord>, IoError> {
        let sections = read_sections(&self.errors_path(platform))?;
        Ok(sections
            .iter()
            .flat_map(|s| s.lines.iter())
            .filter_map(|line| ErrorRecord::from_line(platform, line))
            .collect())
    }

    /// Merge the results of a run into both files of a platform
    ///
    /// Old license lines are dropped when their identity was resolved again.
    /// Old error lines are dropped when their identity was resolved or
    /// failed again. A file with nothing new and nothing dropped is left
    /// untouched.
    pub fn save(
        &self,
        platform: Platform,
        licenses: &[LicenseRecord],
        errors: &[ErrorRecord],
        run_date: NaiveDateTime,
    ) -> Result<(), IoError> {
        let date = run_date.format(DATE_FORMAT).to_string();
        let resolved: HashSet<String> = licenses
            .iter()
            .map(|r| r.dependency.identity_key())
            .collect();
        let failed: HashSet<String> = errors.iter().map(|r| r.dependency.identity_key()).collect();

        let license_path = self.licenses_path(platform);
        let mut sections = read_sections(&license_path)?;
        let dropped = retain_lines(&mut sections, |line| {
            LicenseRecord::identity_from_line(platform, line)
                .is_none_or(|dep| !resolved.contains(&dep.identity_key()))
        });
        let new_lines: Vec<String> = licenses.iter().map(LicenseRecord::to_line).collect();
        self.write_ledger(&license_path, Some(LICENSES_HEADER), sections, dropped, new_lines, &date)?;

        let error_path = self.errors_path(platform);
        let mut sections = read_sections(&error_path)?;
        let dropped = retain_lines(&mut sections, |line| {
            ErrorRecord::from_line(platform, line).is_none_or(|record| {
                let key = record.dependency.identity_key();
                !resolved.contains(&key) && !failed.contains(&key)
            })
        });
        let new_lines: Vec<String> = errors.iter().map(ErrorRecord::to_line).collect();
        self.write_ledger(&error_path, None, sections, dropped, new_lines, &date)?;

        Ok(())
    }

    fn write_ledger(
        &self,
        path: &Path,
        header: Option<&str>,
        mut sections: Vec<Section>,
        dropped: usize,
        new_lines: Vec<String>,
        date: &str,
    ) -> Result<(), IoError> {
        if new_lines.is_empty() && dropped == 0 {
            debug!("Nothing to write to {}", path.display());
            return Ok(());
        }

        sections.retain(|s| !s.lines.is_empty());
        if !new_lines.is_empty() {
            sections.push(Section {
                date: Some(date.to_string()),
                lines: new_lines,
            });
        }

        let mut content = String::new();
        if let Some(header) = header {
            content.push_str(header);
            content.push('\n');
        }
        for section in &sections {
            if let Some(date) = &section.date {
                content.push_str(DATE_PREFIX);
                content.push_str(date);
                content.push('\n');
            }
            for line in &section.lines {
                content.push_str(line);
                content.push('\n');
            }
        }

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| IoError::create_dir(&self.output_dir, e))?;
        rotate_write(path, &content)?;
        debug!(
            "Wrote {} ({} dropped, {} sections)",
            path.display(),
            dropped,
            sections.len()
        );
        Ok(())
    }
}

/// Keeps the lines accepted by `keep`, returning how many were removed
fn retain_lines<F>(sections: &mut [Section], mut keep: F) -> usize
where
    F: FnMut(&str) -> bool,
{
    let mut dropped = 0;
    for section in sections.iter_mut() {
        let before = section.lines.len();
        section.lines.retain(|line| keep(line));
        dropped += before - section.lines.len();
    }
    dropped
}

fn backup_path(path: &Path) -> PathBuf {
    let mut backup: OsString = path.as_os_str().to_owned();
    backup.push(BACKUP_SUFFIX);
    PathBuf::from(backup)
}

/// Replaces `path` with `content` through a `.old` backup
fn rotate_write(path: &Path, content: &str) -> Result<(), IoError> {
    let backup = backup_path(path);
    if path.exists() {
        fs::rename(path, &backup).map_err(|e| IoError::write(path, e))?;
    }
    fs::write(path, content).map_err(|e| IoError::write(path, e))?;
    if backup.exists() {
        fs::remove_file(&backup).map_err(|e| IoError::write(&backup, e))?;
    }
    Ok(())
}

/// Reads the dated sections of a ledger file
///
/// A missing file has no sections. When only the `.old` backup exists, an
/// interrupted rotation is assumed and the backup is read instead.
fn read_sections(path: &Path) -> Result<Vec<Section>, IoError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let backup = backup_path(path);
            match fs::read_to_string(&backup) {
                Ok(c) => {
                    warn!("Recovering {} from {}", path.display(), backup.display());
                    c
                }
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(IoError::generic(&backup, e)),
            }
        }
        Err(e) => return Err(IoError::generic(path, e)),
    };

    let mut sections: Vec<Section> = Vec::new();
    for line in content.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(date) = line.strip_prefix(DATE_PREFIX) {
            sections.push(Section {
                date: Some(date.trim().to_string()),
                lines: Vec::new(),
            });
            continue;
        }
        match sections.last_mut() {
            Some(section) => section.lines.push(line.to_string()),
            None => sections.push(Section {
                date: None,
                lines: vec![line.to_string()],
            }),
        }
    }
    Ok(sections)
}
