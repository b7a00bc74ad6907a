//! Firmware filename matching
//!
//! Firmware binaries are named `<prefix>-v<version><extension>`, for example
//! `hp100-firmware-v1.2.hex`. The version is any run of digits and dots,
//! including an empty run, and is kept exactly as written.

use regex::Regex;

use crate::errors::{ConfigError, ConfigResult};

/// A filename that matched the firmware pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    /// Full filename as listed in the directory
    pub name: String,
    /// Captured version substring
    pub version: String,
    /// Extension the filename ended with
    pub extension: String,
}

/// Compiled matcher for firmware filenames
#[derive(Debug, Clone)]
pub struct FilenamePattern {
    regex: Regex,
}

impl FilenamePattern {
    /// Build a matcher for the given prefix and extensions
    ///
    /// Both prefix and extensions are matched literally, so the dot in `.hex`
    /// only matches a dot.
    pub fn new<S: AsRef<str>>(prefix: &str, extensions: &[S]) -> ConfigResult<Self> {
        if extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                value: "[]".to_string(),
                reason: "At least one firmware extension is required".to_string(),
            });
        }

        let alternatives = extensions
            .iter()
            .map(|ext| regex::escape(ext.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"^{}-v([0-9.]*)({})$", regex::escape(prefix), alternatives);

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Match a filename, returning the captured version on success
    pub fn parse(&self, name: &str) -> Option<ParsedFilename> {
        let captures = self.regex.captures(name)?;
        Some(ParsedFilename {
            name: name.to_string(),
            version: captures.get(1)?.as_str().to_string(),
            extension: captures.get(2)?.as_str().to_string(),
        })
    }

    /// Check whether a filename is a firmware binary
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The regular expression used for matching
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
