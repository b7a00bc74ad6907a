//! Configuration management for Firmware Manifest
//!
//! Configuration is optional. Values come from, in increasing precedence:
//! 1. Built-in defaults (the HP100 product line)
//! 2. A TOML config file, if one is found or given with `--config`
//! 3. Command-line flags

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{
    DigestBackend, ErrorPolicy, GeneratorConfig, HardwareSupport, HistoryBackend,
};
use crate::constants::{config as config_files, firmware, logging, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Manifest generation settings
    pub generator: GeneratorConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfigToml {
    /// Directory containing the firmware binaries
    pub release_dir: PathBuf,
    /// Manifest file name inside the release directory
    pub manifest_file_name: String,
    /// Filename prefix before `-v<version>`
    pub binary_prefix: String,
    /// Accepted filename extensions
    pub binary_extensions: Vec<String>,
    /// Base of the download URL
    pub download_url_base: String,
    /// Hardware every release supports
    pub supports: Vec<HardwareSupport>,
    /// Files processed at once
    pub concurrency: usize,
    /// `abort` or `skip`
    pub on_error: ErrorPolicy,
    /// Emit `latestRelease`
    pub include_latest_release: bool,
    /// `native` or `command`
    pub digest: DigestBackend,
    /// `git` or `none`
    pub history: HistoryBackend,
}

impl Default for GeneratorConfigToml {
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
            on_error: ErrorPolicy::default(),
            include_latest_release: false,
            digest: DigestBackend::default(),
            history: HistoryBackend::default(),
        }
    }
}

impl GeneratorConfigToml {
    /// Convert to runtime GeneratorConfig
    pub fn to_runtime_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            release_dir: self.release_dir.clone(),
            manifest_file_name: self.manifest_file_name.clone(),
            binary_prefix: self.binary_prefix.clone(),
            binary_extensions: self.binary_extensions.clone(),
            download_url_base: self.download_url_base.clone(),
            supports: self.supports.clone(),
            concurrency: self.concurrency,
            on_error: self.on_error,
            include_latest_release: self.include_latest_release,
            digest_backend: self.digest,
            history_backend: self.history,
            dry_run: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Convert TOML-friendly configuration to runtime configuration
    pub fn to_runtime_config(&self) -> GeneratorConfig {
        self.generator.to_runtime_config()
    }

    /// Load configuration from an explicit file or the standard locations
    ///
    /// An explicitly given file must exist. When none is given and no file is
    /// found in the standard locations, the defaults are used.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        if let Some(path) = config_file_override {
            if !path.exists() {
                return Err(ConfigError::NotFound { path });
            }
            return Self::load_from_file(&path).await;
        }

        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(config_files::LOCAL_CONFIG_FILE)];
        if let Ok(user_path) = Self::get_default_config_path() {
            search_paths.push(user_path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Get the default config file path for the current user
    pub fn get_default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(config_files::APP_CONFIG_DIR)
            .join(config_files::USER_CONFIG_FILE))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|source| ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}
