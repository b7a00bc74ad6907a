//! Firmware Manifest Library
//!
//! Builds the release manifest for a directory of firmware binaries: each
//! file named `<prefix>-v<version><ext>` becomes an entry with its download
//! URL, SHA-256 digest, supported hardware and release date, sorted newest
//! first.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
