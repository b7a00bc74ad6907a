//! Configuration structures for manifest generation
//!
//! This module defines the runtime options for a generation run: which
//! directory to scan, how firmware files are named, what each entry
//! advertises, and how the per-file work is scheduled.

use std::path::PathBuf;

use crate::app::digest::DigestBackend;
use crate::app::history::HistoryBackend;
use crate::app::models::HardwareSupport;
use crate::constants::{firmware, workers};
use crate::errors::{ConfigError, ConfigResult};

use super::types::ErrorPolicy;

/// Configuration for a manifest generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory containing the firmware binaries
    pub release_dir: PathBuf,
    /// Manifest file name, written inside `release_dir`
    pub manifest_file_name: String,
    /// Filename prefix before `-v<version>`
    pub binary_prefix: String,
    /// Accepted filename extensions, including the leading dot
    pub binary_extensions: Vec<String>,
    /// Base of the download URL; the filename is appended
    pub download_url_base: String,
    /// Hardware every entry advertises support for
    pub supports: Vec<HardwareSupport>,
    /// Maximum number of files processed at once
    pub concurrency: usize,
    /// What to do when a single file fails
    pub on_error: ErrorPolicy,
    /// Emit `latestRelease` at the top of the manifest
    pub include_latest_release: bool,
    /// Checksum implementation
    pub digest_backend: DigestBackend,
    /// Release date source
    pub history_backend: HistoryBackend,
    /// Render the manifest without writing it
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            release_dir: PathBuf::from(firmware::RELEASE_DIRECTORY),
            manifest_file_name: firmware::MANIFEST_FILE_NAME.to_string(),
            binary_prefix: firmware::BINARY_PREFIX.to_string(),
            binary_extensions: firmware::BINARY_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            download_url_base: firmware::DOWNLOAD_URL_BASE.to_string(),
            supports: vec![HardwareSupport::default()],
            concurrency: workers::DEFAULT_CONCURRENCY,
            on_error: ErrorPolicy::Abort,
            include_latest_release: false,
            digest_backend: DigestBackend::Native,
            history_backend: HistoryBackend::Git,
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    /// Scan a different release directory
    pub fn with_release_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.release_dir = dir.into();
        self
    }

    /// Set the number of files processed at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the per-file error policy
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Select the history source
    pub fn with_history_backend(mut self, backend: HistoryBackend) -> Self {
        self.history_backend = backend;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Full path of the manifest file
    pub fn manifest_path(&self) -> PathBuf {
        self.release_dir.join(&self.manifest_file_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.concurrency == 0 || self.concurrency > workers::MAX_CONCURRENCY {
            return Err(invalid(
                "concurrency",
                self.concurrency.to_string(),
                format!("Must be between 1 and {}", workers::MAX_CONCURRENCY),
            ));
        }

        if self.binary_prefix.is_empty() {
            return Err(invalid("binary_prefix", "", "Prefix cannot be empty"));
        }

        if self.binary_extensions.is_empty() || self.binary_extensions.iter().any(String::is_empty)
        {
            return Err(invalid(
                "binary_extensions",
                format!("{:?}", self.binary_extensions),
                "At least one non-empty extension is required",
            ));
        }

        if self.manifest_file_name.is_empty()
            || self.manifest_file_name.contains(|c: char| c == '/' || c == '\\')
        {
            return Err(invalid(
                "manifest_file_name",
                self.manifest_file_name.clone(),
                "Must be a plain file name",
            ));
        }

        if self.supports.is_empty() {
            return Err(invalid(
                "supports",
                "[]",
                "At least one supported hardware model is required",
            ));
        }

        Ok(())
    }
}

fn invalid(
    field: &str,
    value: impl Into<String>,
    reason: impl Into<String>,
) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.into(),
        reason: reason.into(),
    }
}
