//! Command-line interface components
//!
//! This module contains CLI-specific code for the Firmware Manifest
//! application: argument parsing and the command handler.

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::handle_generate;
