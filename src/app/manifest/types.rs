//! Core types for the release manifest
//!
//! The manifest maps each version string to its release entry. Keys keep the
//! order of the sorted release list, newest first.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::app::models::ReleaseEntry;

/// The manifest document written next to the firmware binaries
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Version of the newest release, only when enabled in configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_release: Option<String>,
    /// Releases keyed by version
    pub releases: IndexMap<String, ReleaseEntry>,
}

impl Manifest {
    /// Build a manifest from entries already sorted newest first
    ///
    /// When two entries share a version, the later one replaces the earlier
    /// value while the key keeps its position. `latest_release`, when
    /// requested, is the version of the first entry.
    pub fn from_sorted(entries: Vec<ReleaseEntry>, include_latest_release: bool) -> Self {
        let latest_release = if include_latest_release {
            entries.first().map(|entry| entry.version.clone())
        } else {
            None
        };

        let mut releases = IndexMap::with_capacity(entries.len());
        for entry in entries {
            releases.insert(entry.version.clone(), entry);
        }

        Self {
            latest_release,
            releases,
        }
    }

    /// Number of distinct versions in the manifest
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Whether the manifest lists no releases
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// The first (newest) release
    pub fn newest(&self) -> Option<&ReleaseEntry> {
        self.releases.values().next()
    }
}
