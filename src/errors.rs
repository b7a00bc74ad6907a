//! Error types for Firmware Manifest
//!
//! This module defines the error types for every stage of manifest generation.
//! Errors carry the path or filename they concern so the single-line message
//! printed on failure is enough to act on.

use std::path::PathBuf;
use thiserror::Error;

/// Directory scanning errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// The release directory does not exist or cannot be read
    #[error("Cannot read release directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No filename in the directory matched the firmware pattern
    #[error("No firmware files matching {pattern} found in {path}")]
    NoMatchingFiles { path: PathBuf, pattern: String },

    /// Every matching file failed and was skipped
    #[error("All {failed} firmware files in {path} failed; no manifest written")]
    AllFilesFailed { path: PathBuf, failed: usize },
}

/// Checksum computation errors
#[derive(Error, Debug)]
pub enum DigestError {
    /// No checksum command is known for the host operating system
    #[error("Unsupported platform for checksum command: {os}")]
    UnsupportedPlatform { os: String },

    /// The file could not be opened or read
    #[error("Failed to read {path} for hashing: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The checksum command could not be started
    #[error("Failed to run checksum command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The checksum command exited unsuccessfully
    #[error("Checksum command '{command}' failed for {path}: {stderr}")]
    CommandFailed {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    /// The checksum command printed something that is not a SHA-256 digest
    #[error("Checksum command '{command}' produced malformed output: {output}")]
    MalformedOutput { command: String, output: String },
}

/// Release history lookup errors
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The history command could not be started
    #[error("Failed to run history command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The history command exited unsuccessfully
    #[error("History lookup failed for {name}: {stderr}")]
    CommandFailed { name: String, stderr: String },
}

/// Manifest serialization and writing errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// JSON serialization error
    #[error("Failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),

    /// The manifest file could not be written
    #[error("Failed to write manifest {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format in {path}: {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Filename pattern could not be compiled
    #[error("Invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// User configuration directory could not be determined
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Scan error
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Checksum error
    #[error(transparent)]
    Digest(#[from] DigestError),

    /// History error
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Building the entry for a single firmware file failed
    #[error("Failed to build release entry for {name}: {source}")]
    EntryFailed {
        name: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wrap an error with the firmware filename it occurred for
    pub fn for_entry(name: impl Into<String>, source: impl Into<AppError>) -> Self {
        Self::EntryFailed {
            name: name.into(),
            source: Box::new(source.into()),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Scan(ScanError::DirectoryUnreadable { .. }) => "io",
            AppError::Scan(ScanError::NoMatchingFiles { .. }) => "configuration",
            AppError::Scan(ScanError::AllFilesFailed { .. }) => "external_tool",
            AppError::Digest(_) | AppError::History(_) => "external_tool",
            AppError::Manifest(_) => "io",
            AppError::Config(_) => "configuration",
            AppError::EntryFailed { source, .. } => source.category(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Scan result type alias
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Digest result type alias
pub type DigestResult<T> = std::result::Result<T, DigestError>;

/// History result type alias
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let empty = AppError::from(ScanError::NoMatchingFiles {
            path: PathBuf::from("/fw"),
            pattern: "x".to_string(),
        });
        assert_eq!(empty.category(), "configuration");

        let platform = AppError::from(DigestError::UnsupportedPlatform {
            os: "plan9".to_string(),
        });
        assert_eq!(platform.category(), "external_tool");
        assert!(platform.to_string().contains("plan9"));
    }

    #[test]
    fn test_entry_failure_keeps_inner_category() {
        let inner = DigestError::Io {
            path: PathBuf::from("/fw/a.hex"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let err = AppError::for_entry("a.hex", inner);

        assert_eq!(err.category(), "external_tool");
        assert!(err.to_string().contains("a.hex"));
    }
}
