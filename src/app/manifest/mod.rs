//! Release manifest assembly and output
//!
//! This module turns the sorted list of release entries into the manifest
//! document and writes it as JSON.
//!
//! # Module Organization
//!
//! - [`types`] - The [`Manifest`] document and its assembly from sorted entries
//! - [`writer`] - JSON rendering and file output
//!
//! # Examples
//!
//! ```rust,no_run
//! use firmware_manifest::app::manifest::{Manifest, write_manifest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::from_sorted(Vec::new(), false);
//! write_manifest("hp100/manifest.json".as_ref(), &manifest).await?;
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod writer;

pub use types::Manifest;
pub use writer::{render_manifest, write_manifest};
