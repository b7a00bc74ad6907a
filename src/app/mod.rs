//! Core application logic for Firmware Manifest
//!
//! This module contains the manifest pipeline: directory listing, filename
//! matching, entry building with checksum and history lookups, version
//! ordering and manifest output.
//!
//! # Examples
//!
//! ```rust,no_run
//! use firmware_manifest::app::{FilenamePattern, compare_versions_desc};
//!
//! let pattern = FilenamePattern::new("hp100-firmware", &[".hex"]).unwrap();
//! let mut versions: Vec<String> = ["hp100-firmware-v1.2.hex", "hp100-firmware-v1.10.hex"]
//!     .iter()
//!     .filter_map(|name| pattern.parse(name))
//!     .map(|parsed| parsed.version)
//!     .collect();
//! versions.sort_by(|a, b| compare_versions_desc(a, b));
//! assert_eq!(versions, vec!["1.10", "1.2"]);
//! ```

pub mod digest;
pub mod entry;
pub mod filename;
pub mod generator;
pub mod hash;
pub mod history;
pub mod listing;
pub mod manifest;
pub mod models;
pub mod version;

// Re-export main public API
pub use digest::{select_digester, CommandDigester, DigestBackend, Digester, NativeDigester};
pub use entry::EntryBuilder;
pub use filename::{FilenamePattern, ParsedFilename};
pub use generator::{
    ErrorPolicy, GenerationReport, GeneratorConfig, ManifestGenerator, SkippedFile,
};
pub use hash::Sha256Hash;
pub use history::{select_history, GitHistory, HistoryBackend, NoHistory, ReleaseHistory};
pub use listing::{list_entry_names, stream_entry_names};
pub use manifest::{render_manifest, write_manifest, Manifest};
pub use models::{download_url, HardwareSupport, ReleaseEntry};
pub use version::{compare_versions, compare_versions_desc, sort_releases};
