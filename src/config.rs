//! Run configuration
//!
//! Values come from built-in defaults, optionally overridden by a TOML file,
//! then by command-line flags.
//!
//! ```toml
//! source_dir = "."
//! output_dir = "licenses"
//! filenames = ["build.gradle", "package.json"]
//! max_errors = 10
//! npm_delay_ms = 2500
//! timeout_secs = 30
//! ```

use crate::cli::CliArgs;
use crate::domain::Platform;
use crate::error::ConfigError;
use crate::registry::{DEFAULT_NPM_DELAY, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of consecutive failures before a platform is halted
pub const DEFAULT_MAX_ERRORS: usize = 10;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "licenses";

/// Which dependencies a run processes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Dependencies found in the manifests
    #[default]
    New,
    /// Dependencies left in the error files by a previous run
    Errors,
    /// Both, deduplicated
    All,
}

impl SelectionMode {
    /// Whether manifests are scanned
    pub fn uses_manifests(&self) -> bool {
        matches!(self, SelectionMode::New | SelectionMode::All)
    }

    /// Whether previous error files are read back
    pub fn uses_previous_errors(&self) -> bool {
        matches!(self, SelectionMode::Errors | SelectionMode::All)
    }
}

/// Settings of an inventory run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Directory searched recursively for manifests
    pub source_dir: PathBuf,
    /// Manifest filenames to search for
    pub filenames: Vec<String>,
    /// Directory receiving downloaded documents, license and error files
    pub output_dir: PathBuf,
    /// Consecutive failures tolerated per platform
    pub max_errors: usize,
    /// Minimum spacing between npm requests, in milliseconds
    pub npm_delay_ms: u64,
    /// HTTP timeout, in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Which dependencies to process
    pub mode: SelectionMode,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            filenames: Platform::all_manifest_filenames()
                .into_iter()
                .map(str::to_string)
                .collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_errors: DEFAULT_MAX_ERRORS,
            npm_delay_ms: DEFAULT_NPM_DELAY.as_millis() as u64,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mode: SelectionMode::New,
        }
    }
}

impl InventoryConfig {
    /// Load a configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(path, &content)
    }

    /// Parse TOML configuration content
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Build the configuration of a run from CLI arguments
    ///
    /// The `--config` file, when given, provides the base values; explicit
    /// flags override them.
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(source) = &args.path {
            config.source_dir = source.clone();
        }
        if let Some(output) = &args.output {
            config.output_dir = output.clone();
        }
        if !args.files.is_empty() {
            config.filenames = args.files.clone();
        }
        if let Some(max_errors) = args.max_errors {
            config.max_errors = max_errors;
        }
        if let Some(mode) = args.mode {
            config.mode = mode;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and filenames
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_errors < 1 {
            return Err(ConfigError::InvalidMaxErrors {
                value: self.max_errors,
            });
        }
        if self.filenames.is_empty() {
            return Err(ConfigError::NoManifestFilenames);
        }
        if let Some(name) = self
            .filenames
            .iter()
            .find(|name| Platform::from_filename(name).is_none())
        {
            return Err(ConfigError::UnsupportedFilename { name: name.clone() });
        }
        if self.output_dir.is_file() {
            return Err(ConfigError::InvalidPath {
                path: self.output_dir.clone(),
                message: "output directory is a file".to_string(),
            });
        }
        Ok(())
    }

    /// Spacing between npm requests
    pub fn npm_delay(&self) -> Duration {
        Duration::from_millis(self.npm_delay_ms)
    }

    /// HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("licenses"));
        assert_eq!(config.max_errors, 10);
        assert_eq!(config.npm_delay(), Duration::from_millis(2500));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.filenames.len(), 8);
        assert_eq!(config.mode, SelectionMode::New);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = InventoryConfig::from_toml(
            Path::new("inventory.toml"),
            "max_errors = 3\nfilenames = [\"go.mod\"]\nmode = \"all\"\n",
        )
        .unwrap();
        assert_eq!(config.max_errors, 3);
        assert_eq!(config.filenames, vec!["go.mod"]);
        assert_eq!(config.mode, SelectionMode::All);
        assert_eq!(config.output_dir, PathBuf::from("licenses"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = InventoryConfig::from_toml(Path::new("x.toml"), "max_errors = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = InventoryConfig {
            max_errors: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxErrors { value: 0 })
        ));

        config.max_errors = 1;
        config.filenames = vec![];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoManifestFilenames)
        ));

        config.filenames = vec!["pom.xml".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedFilename { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("inventory.toml");
        fs::write(&file, "max_errors = 3\noutput_dir = \"out\"\n").unwrap();

        let args = CliArgs::parse_from([
            "license-inventory",
            "src",
            "--config",
            file.to_str().unwrap(),
            "--max-errors",
            "5",
            "--file",
            "Podfile",
        ]);
        let config = InventoryConfig::from_cli(&args).unwrap();

        assert_eq!(config.source_dir, PathBuf::from("src"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_errors, 5);
        assert_eq!(config.filenames, vec!["Podfile"]);
    }

    #[test]
    fn test_missing_config_file() {
        let err = InventoryConfig::from_file(Path::new("/nonexistent/inventory.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_selection_mode() {
        assert!(SelectionMode::New.uses_manifests());
        assert!(!SelectionMode::New.uses_previous_errors());
        assert!(!SelectionMode::Errors.uses_manifests());
        assert!(SelectionMode::All.uses_manifests() && SelectionMode::All.uses_previous_errors());
    }
}
