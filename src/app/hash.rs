//! SHA-256 digest type
//!
//! Stores a digest as its raw 32 bytes and serializes it as the lowercase
//! 64-character hex string used in the manifest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::digest::SHA256_HEX_LENGTH;

/// A SHA-256 digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash([u8; 32]);

/// Error returned when a string is not a SHA-256 hex digest
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid SHA-256 hex digest: {0}")]
pub struct InvalidDigest(pub String);

impl Sha256Hash {
    /// Create a digest from a hex string
    ///
    /// Accepts exactly 64 hexadecimal characters in either case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use firmware_manifest::app::Sha256Hash;
    ///
    /// let hex = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
    /// let hash = Sha256Hash::from_hex(hex)?;
    /// assert_eq!(hash.to_hex(), hex.to_lowercase());
    /// # Ok::<(), firmware_manifest::app::hash::InvalidDigest>(())
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, InvalidDigest> {
        if hex.len() != SHA256_HEX_LENGTH {
            return Err(InvalidDigest(hex.to_string()));
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| InvalidDigest(hex.to_string()))?;
        Ok(Self(bytes))
    }

    /// Lowercase 64-character hex representation
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from raw digest bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Sha256Hash {
    type Err = InvalidDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serialized as hex so the manifest stays human readable
impl Serialize for Sha256Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Self::from_hex(&hex_string).map_err(serde::de::Error::custom)
    }
}
