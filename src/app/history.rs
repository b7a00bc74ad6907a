//! Release date lookup from version-control history
//!
//! A firmware file's release date is the date of the commit that added it.
//! Files with no history get an empty date, which is not an error.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::constants::history;
use crate::errors::{HistoryError, HistoryResult};

/// Looks up when a file in the release directory was first released
#[async_trait]
pub trait ReleaseHistory: Send + Sync {
    /// Release date of `name` inside `dir`, or `None` when lookup is disabled
    ///
    /// An empty string means the lookup ran but found no history.
    async fn release_date(&self, dir: &Path, name: &str) -> HistoryResult<Option<String>>;
}

/// Which history source to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// Query git for the commit that added the file
    #[default]
    Git,
    /// Skip the lookup; entries carry no release date
    None,
}

/// Release dates from `git log`
#[derive(Debug, Clone)]
pub struct GitHistory {
    program: String,
}

impl GitHistory {
    pub fn new() -> Self {
        Self {
            program: history::GIT_COMMAND.to_string(),
        }
    }
}

impl Default for GitHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Take the first line of log output, trimmed
///
/// Leading blank lines are skipped, so output that starts with a newline
/// still yields the date.
pub(crate) fn first_log_date(stdout: &str) -> String {
    let date = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();

    if !date.is_empty()
        && NaiveDate::parse_from_str(&date, history::RELEASE_DATE_FORMAT).is_err()
    {
        warn!("History returned an unexpected date format: {}", date);
    }
    date
}

#[async_trait]
impl ReleaseHistory for GitHistory {
    async fn release_date(&self, dir: &Path, name: &str) -> HistoryResult<Option<String>> {
        let output = Command::new(&self.program)
            .args(["log", "--follow", "--diff-filter=A", "--format=%as", "--", name])
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| HistoryError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(HistoryError::CommandFailed {
                name: name.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let date = first_log_date(&String::from_utf8_lossy(&output.stdout));
        debug!("Release date for {}: '{}'", name, date);
        Ok(Some(date))
    }
}

/// History source that performs no lookup
#[derive(Debug, Clone, Default)]
pub struct NoHistory;

#[async_trait]
impl ReleaseHistory for NoHistory {
    async fn release_date(&self, _dir: &Path, _name: &str) -> HistoryResult<Option<String>> {
        Ok(None)
    }
}

/// Create the history source for a backend
pub fn select_history(backend: HistoryBackend) -> Arc<dyn ReleaseHistory> {
    match backend {
        HistoryBackend::Git => Arc::new(GitHistory::new()),
        HistoryBackend::None => Arc::new(NoHistory),
    }
}
