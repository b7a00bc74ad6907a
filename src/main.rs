//! Firmware Manifest CLI application
//!
//! Scans a firmware release directory and writes its manifest.json.

use std::process;

use tracing::{info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use firmware_manifest::cli::{handle_generate, Cli};
use firmware_manifest::config::AppConfig;
use firmware_manifest::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let app_config = AppConfig::load(cli.config.clone()).await?;

    init_logging(&cli, &app_config);

    info!("Firmware Manifest v{} starting", env!("CARGO_PKG_VERSION"));
    handle_generate(&cli, app_config).await
}

/// Initialize logging from the CLI verbosity flags or the configured level
fn init_logging(cli: &Cli, app_config: &AppConfig) {
    let log_level = cli.log_level(&app_config.logging.level);

    let mut filter = EnvFilter::from_default_env();
    let directive = format!("firmware_manifest={}", log_level).parse::<Directive>();
    if let Ok(directive) = &directive {
        filter = filter.add_directive(directive.clone());
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.very_verbose)
        .with_writer(std::io::stderr)
        .init();

    if directive.is_err() {
        warn!("Ignoring invalid log level '{}'", log_level);
    }

    if cli.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.verbose {
        info!("Verbose logging enabled");
    }
}
