//! Per-ROM patch information.
//!
//! A `PatchInfo` maps a ROM filename to a configuration key and decides,
//! per key, whether device-identity assertions stay in the updater-script.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key used when no conditional matches the filename.
pub const DEFAULT_KEY: &str = "default";

/// A filename pattern that selects a non-default key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    /// Regex matched against the file's base name
    pub pattern: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchInfo {
    #[serde(default)]
    pub id: String,
    /// Checked in order, first match wins
    #[serde(default)]
    pub conditionals: Vec<Conditional>,
    /// Whether device checks are kept, per key
    #[serde(default)]
    pub device_check: BTreeMap<String, bool>,
}

impl PatchInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Resolve the configuration key for a ROM file.
    ///
    /// Only the base name is matched, so `/sdcard/roms/cm-11.zip` and
    /// `cm-11.zip` resolve identically.
    ///
    /// # Errors
    ///
    /// Returns `PatcherError::Pattern` if a conditional pattern is not a
    /// valid regex.
    pub fn key_from_filename(&self, filename: &str) -> Result<String> {
        let base = Path::new(filename)
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| filename.into());

        for conditional in &self.conditionals {
            if Regex::new(&conditional.pattern)?.is_match(&base) {
                return Ok(conditional.key.clone());
            }
        }
        Ok(DEFAULT_KEY.to_string())
    }

    /// Whether device checks are kept for `key`.
    ///
    /// Falls back to the `default` entry, then to `true`.
    pub fn device_check(&self, key: &str) -> bool {
        self.device_check
            .get(key)
            .or_else(|| self.device_check.get(DEFAULT_KEY))
            .copied()
            .unwrap_or(true)
    }

    /// Set the device-check flag for a key
    pub fn set_device_check(&mut self, key: impl Into<String>, keep: bool) {
        self.device_check.insert(key.into(), keep);
    }
}
