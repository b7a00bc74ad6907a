//! Manifest generation pipeline
//!
//! The generator scans a release directory, keeps the filenames that match the
//! firmware pattern, builds an entry for each of them with bounded concurrency,
//! sorts the entries newest first and writes the manifest.
//!
//! # Architecture
//!
//! - [`config`] - Runtime configuration and validation
//! - [`types`] - Error policy and the run report
//!
//! # Examples
//!
//! ```rust,no_run
//! use firmware_manifest::app::{GeneratorConfig, ManifestGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::default()
//!     .with_release_dir("./hp100")
//!     .with_concurrency(4);
//!
//! let generator = ManifestGenerator::new(config)?;
//! let report = generator.run().await?;
//! println!("Updated {}", report.manifest_path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use futures::{stream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::app::digest::{select_digester, Digester};
use crate::app::entry::EntryBuilder;
use crate::app::filename::{FilenamePattern, ParsedFilename};
use crate::app::history::{select_history, ReleaseHistory};
use crate::app::listing::list_entry_names;
use crate::app::manifest::{render_manifest, write_manifest, Manifest};
use crate::app::models::ReleaseEntry;
use crate::app::version::sort_releases;
use crate::errors::{AppError, Result, ScanError};

pub use config::GeneratorConfig;
pub use types::{ErrorPolicy, GenerationReport, SkippedFile};

/// Runs the scan, build, sort and write pipeline for one release directory
#[derive(Debug)]
pub struct ManifestGenerator {
    config: GeneratorConfig,
    pattern: FilenamePattern,
    builder: EntryBuilder,
}

/// Matched firmware files plus the number of entries that did not match
#[derive(Debug, Clone, Default)]
struct Discovery {
    matched: Vec<ParsedFilename>,
    ignored: usize,
}

/// Entries that built successfully plus the files that were skipped
struct BuildOutcome {
    entries: Vec<ReleaseEntry>,
    skipped: Vec<SkippedFile>,
}

impl ManifestGenerator {
    /// Create a generator for the host platform
    ///
    /// The checksum backend is selected here, so an unsupported platform
    /// fails before any directory is read.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::for_platform(config, std::env::consts::OS)
    }

    /// Create a generator as if running on the named operating system
    pub fn for_platform(config: GeneratorConfig, os: &str) -> Result<Self> {
        let digester = select_digester(config.digest_backend, os)?;
        let history = select_history(config.history_backend);
        Self::with_components(config, digester, history)
    }

    /// Create a generator with explicit checksum and history implementations
    pub fn with_components(
        config: GeneratorConfig,
        digester: Arc<dyn Digester>,
        history: Arc<dyn ReleaseHistory>,
    ) -> Result<Self> {
        config.validate()?;
        let pattern = FilenamePattern::new(&config.binary_prefix, &config.binary_extensions)?;
        let builder = EntryBuilder::new(
            config.release_dir.clone(),
            config.download_url_base.clone(),
            config.supports.clone(),
            digester,
            history,
        );

        Ok(Self {
            config,
            pattern,
            builder,
        })
    }

    /// The configuration this generator runs with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scan the release directory and write the manifest
    pub async fn run(&self) -> Result<GenerationReport> {
        let release_dir = &self.config.release_dir;
        info!("Scanning {}", release_dir.display());

        let names = list_entry_names(release_dir).await?;
        self.run_with_names(names).await
    }

    /// Run the pipeline over an explicit list of directory entry names
    ///
    /// Names are processed in the given order, which decides which file wins
    /// when two files carry the same version.
    pub async fn run_with_names<I>(&self, names: I) -> Result<GenerationReport>
    where
        I: IntoIterator<Item = String>,
    {
        let start = Instant::now();
        let manifest_path = self.config.manifest_path();

        let (manifest, discovery_ignored, skipped) = self.build_manifest(names).await?;

        let dry_run_output = if self.config.dry_run {
            info!("Dry run, not writing {}", manifest_path.display());
            Some(render_manifest(&manifest)?)
        } else {
            write_manifest(&manifest_path, &manifest).await?;
            None
        };

        let report = GenerationReport {
            manifest_path,
            releases: manifest.len(),
            latest_version: manifest.newest().map(|entry| entry.version.clone()),
            ignored_entries: discovery_ignored,
            skipped,
            dry_run_output,
            elapsed: start.elapsed(),
        };
        info!("Manifest complete: {}", report.summary());
        Ok(report)
    }

    /// Build the manifest for the given entry names without writing it
    pub async fn build_manifest<I>(&self, names: I) -> Result<(Manifest, usize, Vec<SkippedFile>)>
    where
        I: IntoIterator<Item = String>,
    {
        let discovery = self.discover(names);
        if discovery.matched.is_empty() {
            return Err(ScanError::NoMatchingFiles {
                path: self.config.release_dir.clone(),
                pattern: self.pattern.as_str().to_string(),
            }
            .into());
        }
        info!(
            "Found {} firmware files ({} other entries ignored)",
            discovery.matched.len(),
            discovery.ignored
        );

        let matched = discovery.matched.len();
        let BuildOutcome {
            mut entries,
            skipped,
        } = self.build_entries(discovery.matched).await?;

        if entries.is_empty() {
            return Err(ScanError::AllFilesFailed {
                path: self.config.release_dir.clone(),
                failed: matched,
            }
            .into());
        }

        sort_releases(&mut entries);
        let manifest = Manifest::from_sorted(entries, self.config.include_latest_release);
        Ok((manifest, discovery.ignored, skipped))
    }

    fn discover<I>(&self, names: I) -> Discovery
    where
        I: IntoIterator<Item = String>,
    {
        let mut discovery = Discovery::default();
        for name in names {
            match self.pattern.parse(&name) {
                Some(parsed) => {
                    debug!("Matched {} as version '{}'", parsed.name, parsed.version);
                    discovery.matched.push(parsed);
                }
                None => discovery.ignored += 1,
            }
        }
        discovery
    }

    /// Build every entry, at most `concurrency` at a time
    ///
    /// Every file is attempted regardless of earlier failures. Results keep
    /// the input order.
    async fn build_entries(&self, matched: Vec<ParsedFilename>) -> Result<BuildOutcome> {
        let builder = &self.builder;
        let results: Vec<(ParsedFilename, Result<ReleaseEntry>)> = stream::iter(matched)
            .map(|parsed| async move {
                let result = builder.build(&parsed).await;
                (parsed, result)
            })
            .buffered(self.config.concurrency)
            .collect()
            .await;

        let mut entries = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        let mut first_failure = None;

        for (parsed, result) in results {
            match result {
                Ok(entry) => entries.push(entry),
                Err(err) => match self.config.on_error {
                    ErrorPolicy::Abort => {
                        error!("Failed to build entry for {}: {}", parsed.name, err);
                        if first_failure.is_none() {
                            first_failure = Some(AppError::for_entry(parsed.name, err));
                        }
                    }
                    ErrorPolicy::Skip => {
                        warn!("Skipping {}: {}", parsed.name, err);
                        skipped.push(SkippedFile {
                            name: parsed.name,
                            reason: err.to_string(),
                        });
                    }
                },
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }

        Ok(BuildOutcome { entries, skipped })
    }
}
