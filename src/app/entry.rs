//! Release entry construction
//!
//! Turns a matched firmware filename into a [`ReleaseEntry`] by hashing the
//! file and looking up its release date. The two lookups run concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::digest::Digester;
use super::filename::ParsedFilename;
use super::history::ReleaseHistory;
use super::models::{download_url, HardwareSupport, ReleaseEntry};
use crate::errors::{AppError, Result};

/// Builds release entries for files in one release directory
#[derive(Clone)]
pub struct EntryBuilder {
    release_dir: PathBuf,
    url_base: String,
    supports: Vec<HardwareSupport>,
    digester: Arc<dyn Digester>,
    history: Arc<dyn ReleaseHistory>,
}

impl std::fmt::Debug for EntryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryBuilder")
            .field("release_dir", &self.release_dir)
            .field("url_base", &self.url_base)
            .field("supports", &self.supports)
            .finish_non_exhaustive()
    }
}

impl EntryBuilder {
    pub fn new(
        release_dir: PathBuf,
        url_base: String,
        supports: Vec<HardwareSupport>,
        digester: Arc<dyn Digester>,
        history: Arc<dyn ReleaseHistory>,
    ) -> Self {
        Self {
            release_dir,
            url_base,
            supports,
            digester,
            history,
        }
    }

    /// Hash the file, look up its release date and assemble the entry
    pub async fn build(&self, parsed: &ParsedFilename) -> Result<ReleaseEntry> {
        let path = self.release_dir.join(&parsed.name);

        let (sha256, release_date) = tokio::try_join!(
            async { self.digester.digest(&path).await.map_err(AppError::from) },
            async {
                self.history
                    .release_date(&self.release_dir, &parsed.name)
                    .await
                    .map_err(AppError::from)
            },
        )?;

        debug!("Built entry for {} ({})", parsed.name, sha256);
        Ok(ReleaseEntry {
            url: download_url(&self.url_base, &parsed.name),
            name: parsed.name.clone(),
            version: parsed.version.clone(),
            supports: self.supports.clone(),
            sha256,
            release_date,
        })
    }
}
