//! Command handler for Firmware Manifest
//!
//! Connects the parsed command line and configuration file to the manifest
//! generator and prints the outcome.

use tracing::{info, warn};

use crate::app::ManifestGenerator;
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::errors::Result;

/// Apply the flags to the loaded configuration, run the generator and report
pub async fn handle_generate(cli: &Cli, app_config: AppConfig) -> Result<()> {
    let config = cli.apply_to(app_config.to_runtime_config());
    info!(
        "Generating manifest for {} with {} concurrent files",
        config.release_dir.display(),
        config.concurrency
    );

    let generator = ManifestGenerator::new(config)?;
    let report = generator.run().await?;

    for skipped in &report.skipped {
        warn!("Not in manifest: {}", skipped);
    }

    match &report.dry_run_output {
        Some(json) => print!("{}", json),
        None => println!("Updated {}", report.manifest_path.display()),
    }

    if !report.skipped.is_empty() && !cli.quiet {
        eprintln!(
            "⚠️  {} firmware file(s) skipped; see log for details",
            report.skipped.len()
        );
    }

    Ok(())
}
