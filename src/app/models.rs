//! Data models for firmware releases
//!
//! These are the records written into the manifest. Field names follow the
//! manifest's JSON schema (`releaseDate` is camel-cased on the wire).

use serde::{Deserialize, Serialize};

use super::hash::Sha256Hash;
use crate::constants::firmware;

/// A hardware model and interface version a firmware binary runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareSupport {
    /// Hardware model name (e.g., "HP100")
    pub model: String,
    /// Hardware interface version (e.g., "1.0")
    pub version: String,
}

impl HardwareSupport {
    /// Create a new capability descriptor
    pub fn new(model: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            version: version.into(),
        }
    }
}

impl Default for HardwareSupport {
    fn default() -> Self {
        Self::new(firmware::HARDWARE_MODEL, firmware::HARDWARE_VERSION)
    }
}

/// One firmware release as it appears in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEntry {
    /// Public download location
    pub url: String,
    /// Filename inside the release directory
    pub name: String,
    /// Version captured from the filename
    pub version: String,
    /// Hardware this binary is compatible with
    pub supports: Vec<HardwareSupport>,
    /// SHA-256 of the file contents, lowercase hex on the wire
    pub sha256: Sha256Hash,
    /// Date the file was first committed, empty when it has no history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Build the download URL for a firmware file
///
/// A trailing slash on the base is ignored so both `https://host/fw` and
/// `https://host/fw/` produce the same URL.
pub fn download_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}
