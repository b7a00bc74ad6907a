//! Result and policy types for manifest generation

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a failure while building one entry affects the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Finish all files, report every failure, then fail the run
    #[default]
    Abort,
    /// Leave failing files out of the manifest and report them
    Skip,
}

/// A firmware file left out of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Filename in the release directory
    pub name: String,
    /// Why building its entry failed
    pub reason: String,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Where the manifest was (or, in dry-run mode, would have been) written
    pub manifest_path: PathBuf,
    /// Number of distinct versions in the manifest
    pub releases: usize,
    /// Version of the newest release
    pub latest_version: Option<String>,
    /// Directory entries that did not match the firmware pattern
    pub ignored_entries: usize,
    /// Firmware files excluded because their entry failed
    pub skipped: Vec<SkippedFile>,
    /// Rendered manifest when nothing was written
    pub dry_run_output: Option<String>,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Whether the manifest file was written
    pub fn was_written(&self) -> bool {
        self.dry_run_output.is_none()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} releases (latest {}), {} ignored, {} skipped in {:.2?}",
            self.releases,
            self.latest_version.as_deref().unwrap_or("none"),
            self.ignored_entries,
            self.skipped.len(),
            self.elapsed
        )
    }
}
