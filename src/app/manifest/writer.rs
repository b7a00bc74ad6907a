//! Manifest serialization and output
//!
//! The manifest is rendered as pretty-printed JSON with two-space indentation
//! and written over any previous file. The write is not atomic.

use std::path::Path;

use tracing::debug;

use super::types::Manifest;
use crate::errors::{ManifestError, ManifestResult};

/// Render the manifest as pretty-printed JSON followed by a newline
pub fn render_manifest(manifest: &Manifest) -> ManifestResult<String> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Render and write the manifest to `path`, replacing any existing file
pub async fn write_manifest(path: &Path, manifest: &Manifest) -> ManifestResult<()> {
    let json = render_manifest(manifest)?;
    tokio::fs::write(path, json.as_bytes())
        .await
        .map_err(|source| ManifestError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}
