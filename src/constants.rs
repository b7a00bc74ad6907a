//! Application constants for Firmware Manifest
//!
//! This module centralizes the product defaults used throughout the application,
//! organized by functional domain. Every value here can be overridden through
//! the configuration file; these are the values used when nothing is configured.

/// Firmware product line defaults
pub mod firmware {
    /// Filename prefix shared by every firmware binary of the product line
    pub const BINARY_PREFIX: &str = "hp100-firmware";

    /// Recognised firmware binary extensions (matched literally)
    pub const BINARY_EXTENSIONS: &[&str] = &[".hex"];

    /// Hardware model the binaries are built for
    pub const HARDWARE_MODEL: &str = "HP100";

    /// Hardware interface version the binaries support
    pub const HARDWARE_VERSION: &str = "1.0";

    /// Base of the public download location; the filename is appended
    pub const DOWNLOAD_URL_BASE: &str = "https://firmware.example.com/hp100";

    /// Directory scanned when none is configured
    pub const RELEASE_DIRECTORY: &str = "./hp100";

    /// Manifest file written into the scanned directory
    pub const MANIFEST_FILE_NAME: &str = "manifest.json";
}

/// Concurrency limits for entry building
pub mod workers {
    /// Default number of files processed at the same time
    pub const DEFAULT_CONCURRENCY: usize = 8;

    /// Upper bound accepted from configuration
    pub const MAX_CONCURRENCY: usize = 256;
}

/// Checksum computation constants
pub mod digest {
    /// Read buffer size for streaming file hashing (64KB)
    pub const READ_CHUNK_SIZE: usize = 64 * 1024;

    /// Length of a hex-encoded SHA-256 digest
    pub const SHA256_HEX_LENGTH: usize = 64;

    /// Checksum command on Linux-class hosts
    pub const LINUX_COMMAND: &str = "sha256sum";

    /// Checksum command on Darwin hosts
    pub const DARWIN_COMMAND: &str = "shasum";

    /// Arguments passed to the Darwin checksum command before the path
    pub const DARWIN_ARGS: &[&str] = &["-a", "256"];
}

/// Version-control history lookup
pub mod history {
    /// Executable used for history queries
    pub const GIT_COMMAND: &str = "git";

    /// Date format produced by the history query and accepted in manifests
    pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Configuration file discovery
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "firmware-manifest.toml";

    /// Application directory under the user config dir
    pub const APP_CONFIG_DIR: &str = "firmware-manifest";

    /// Configuration file name inside the application directory
    pub const USER_CONFIG_FILE: &str = "config.toml";
}

/// Logging defaults
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

// Re-export commonly used constants for convenience
pub use firmware::{BINARY_PREFIX, MANIFEST_FILE_NAME};
pub use workers::DEFAULT_CONCURRENCY;
