//! File checksum computation
//!
//! The [`Digester`] capability turns a file path into its SHA-256 digest.
//! Two backends exist: [`NativeDigester`] hashes the file in-process with the
//! `sha2` crate, [`CommandDigester`] shells out to the platform checksum tool.
//! The backend is chosen once at startup by [`select_digester`]; an unknown
//! platform is rejected there, before any directory is scanned.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

use super::hash::Sha256Hash;
use crate::constants::digest;
use crate::errors::{DigestError, DigestResult};

/// Computes the checksum of a file's exact contents
#[async_trait]
pub trait Digester: Send + Sync {
    /// Digest the file at `path`
    async fn digest(&self, path: &Path) -> DigestResult<Sha256Hash>;
}

/// Which checksum implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestBackend {
    /// Hash in-process
    #[default]
    Native,
    /// Run the platform checksum command
    Command,
}

/// In-process SHA-256, streaming the file in fixed-size chunks
#[derive(Debug, Clone, Default)]
pub struct NativeDigester;

impl NativeDigester {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Digester for NativeDigester {
    async fn digest(&self, path: &Path) -> DigestResult<Sha256Hash> {
        let io_error = |source| DigestError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::open(path).await.map_err(io_error)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; digest::READ_CHUNK_SIZE];

        loop {
            let read = file.read(&mut buffer).await.map_err(io_error)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(Sha256Hash::from_bytes(hasher.finalize().into()))
    }
}

/// External checksum command selected by host operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDigester {
    program: String,
    args: Vec<String>,
}

impl CommandDigester {
    /// Select the checksum command for the current host
    pub fn for_host() -> DigestResult<Self> {
        Self::for_os(std::env::consts::OS)
    }

    /// Select the checksum command for a named operating system
    ///
    /// Uses the names reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> DigestResult<Self> {
        match os {
            "linux" | "android" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" => Ok(Self {
                program: digest::LINUX_COMMAND.to_string(),
                args: Vec::new(),
            }),
            "macos" => Ok(Self {
                program: digest::DARWIN_COMMAND.to_string(),
                args: digest::DARWIN_ARGS.iter().map(|a| a.to_string()).collect(),
            }),
            other => Err(DigestError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Command line without the file argument, for logs and errors
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Extract the digest from checksum tool output (`<hex>  <path>`)
fn parse_checksum_output(command: &str, stdout: &str) -> DigestResult<Sha256Hash> {
    let token = stdout.split_whitespace().next().unwrap_or_default();
    Sha256Hash::from_hex(token).map_err(|_| DigestError::MalformedOutput {
        command: command.to_string(),
        output: stdout.trim().to_string(),
    })
}

#[async_trait]
impl Digester for CommandDigester {
    async fn digest(&self, path: &Path) -> DigestResult<Sha256Hash> {
        let command = self.command_line();
        debug!("Running '{} {}'", command, path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| DigestError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DigestError::CommandFailed {
                command,
                path: path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_checksum_output(&command, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Pick the digester for a backend and operating system
pub fn select_digester(backend: DigestBackend, os: &str) -> DigestResult<Arc<dyn Digester>> {
    match backend {
        DigestBackend::Native => Ok(Arc::new(NativeDigester::new())),
        DigestBackend::Command => {
            let digester = CommandDigester::for_os(os)?;
            debug!("Using checksum command '{}'", digester.command_line());
            Ok(Arc::new(digester))
        }
    }
}
