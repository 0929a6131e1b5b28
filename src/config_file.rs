//! Configuration file handling for saving and loading patcher configs.
//!
//! A config names the target device (with its raw partition paths) and the
//! patch info deciding whether device checks are stripped.
//!
//! ```json
//! {
//!   "device": {
//!     "id": "mako",
//!     "name": "Nexus 4",
//!     "partitions": { "system": "/dev/block/mmcblk0p21" }
//!   },
//!   "patch_info": {
//!     "id": "cyanogenmod",
//!     "conditionals": [{ "pattern": "NIGHTLY", "key": "nightly" }],
//!     "device_check": { "default": true, "nightly": false }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::device::{Device, DeviceInfo};
use crate::patch_info::PatchInfo;
use crate::patcher::FileInfo;
use crate::types::Partition;

/// Patcher configuration that can be saved/loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatcherConfig {
    pub device: DeviceInfo,
    #[serde(default)]
    pub patch_info: PatchInfo,
}

impl PatcherConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.device.id.trim().is_empty() {
            anyhow::bail!("Device id must be specified");
        }

        for partition in Partition::iter() {
            if let Some(path) = self.device.partition(partition) {
                if !path.is_empty() && !path.starts_with('/') {
                    anyhow::bail!(
                        "Partition path for {} must be absolute, got {:?}",
                        partition,
                        path
                    );
                }
            }
        }

        for conditional in &self.patch_info.conditionals {
            Regex::new(&conditional.pattern).with_context(|| {
                format!("Invalid filename pattern {:?}", conditional.pattern)
            })?;
            if conditional.key.trim().is_empty() {
                anyhow::bail!("Conditional {:?} has an empty key", conditional.pattern);
            }
        }

        Ok(())
    }

    /// Bind this configuration to a ROM file
    pub fn file_info(&self, filename: impl Into<String>) -> FileInfo {
        FileInfo {
            filename: filename.into(),
            device: self.device.clone(),
            patch_info: self.patch_info.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch_info::Conditional;

    fn valid() -> PatcherConfig {
        PatcherConfig {
            device: DeviceInfo::new("mako").with_partition(Partition::System, "/dev/block/mmcblk0p21"),
            patch_info: PatchInfo::new("aosp"),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_empty_device_id_rejected() {
        let mut config = valid();
        config.device.id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_partition_rejected() {
        let mut config = valid();
        config.device.partitions.cache = Some("mmcblk0p22".to_string());
        let err = config.validate().expect_err("relative path");
        assert!(err.to_string().contains("cache"));
    }

    #[test]
    fn test_bad_conditional_rejected() {
        let mut config = valid();
        config.patch_info.conditionals.push(Conditional {
            pattern: "(unclosed".to_string(),
            key: "x".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimal_json() {
        let config: PatcherConfig =
            serde_json::from_str(r#"{"device": {"id": "generic"}}"#).expect("minimal config");
        assert!(config.validate().is_ok());
        assert!(config.patch_info.conditionals.is_empty());
        assert!(config.patch_info.device_check("default"));
    }

    #[test]
    fn test_file_info() {
        let info = valid().file_info("aosp-4.4.zip");
        assert_eq!(info.filename, "aosp-4.4.zip");
        assert_eq!(info.device.id, "mako");
    }
}
