//! Command-line argument parsing for Firmware Manifest
//!
//! Every flag is optional: with none given, the configured release directory
//! is scanned and its manifest rewritten.

use std::path::PathBuf;

use clap::Parser;

use crate::app::{ErrorPolicy, GeneratorConfig};

/// Firmware Manifest - describe a directory of firmware releases
#[derive(Parser, Debug)]
#[command(
    name = "firmware_manifest",
    version,
    about = "Generate a JSON manifest for a directory of firmware releases",
    long_about = "Scans a directory of firmware binaries named <prefix>-v<version><ext>, hashes each file,
looks up its release date and writes a manifest.json sorted newest first."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Release directory to scan (overrides configuration)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Manifest file name inside the release directory
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Number of files processed at once
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Leave out files that fail instead of aborting
    #[arg(long)]
    pub skip_failures: bool,

    /// Print the manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (trace level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - only warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level from the verbosity flags, falling back to the configured one
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.very_verbose {
            "trace"
        } else if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            configured
        }
    }

    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_to(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(dir) = &self.dir {
            config.release_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.manifest_file_name = output.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.skip_failures {
            config.on_error = ErrorPolicy::Skip;
        }
        config.dry_run = self.dry_run;
        config
    }
}
