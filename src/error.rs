//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with reading or comment-stripping manifest files
//! - DownloadError: Transport-level failures talking to registries and forges
//! - ConfigError: Issues with CLI or file configuration
//! - IoError: File system operation failures (fatal for a run)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Download related errors
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A block comment opened without a matching closer
    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment { line: usize },

    /// Manifest filename is not mapped to any platform
    #[error("unsupported manifest format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Transport-level errors raised while fetching a URL
///
/// These never abort a run: the download layer turns them into error
/// records for the affected dependency.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Connection, TLS or protocol failure
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    /// Request exceeded the client timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Consecutive error threshold must allow at least one failure
    #[error("invalid max consecutive errors '{value}': expected a value of at least 1")]
    InvalidMaxErrors { value: usize },

    /// No manifest filename left to search for
    #[error("no manifest filename configured")]
    NoManifestFilenames,

    /// Manifest filename not handled by any platform
    #[error("unsupported manifest filename '{name}'")]
    UnsupportedFilename { name: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to create an output directory
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or rotate an output file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new UnterminatedComment error (1-based line)
    pub fn unterminated_comment(line: usize) -> Self {
        ManifestError::UnterminatedComment { line }
    }
}

impl DownloadError {
    /// Creates a new Network error
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        DownloadError::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        DownloadError::Timeout { url: url.into() }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new CreateDir error
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
