//! Device descriptors.
//!
//! The rewriter only needs one thing from a device: the raw block path it uses
//! for each logical partition, so that lines naming `/dev/block/...` instead of
//! `system`/`cache`/`data` can still be classified.

use serde::{Deserialize, Serialize};

use crate::types::Partition;

/// Read-only partition lookup.
///
/// Implementations return `None` when the device defines no path for the
/// partition. An empty string is treated the same as `None` by callers.
pub trait Device {
    /// Raw on-device path for a logical partition (e.g. `/dev/block/mmcblk0p14`).
    fn partition(&self, partition: Partition) -> Option<&str>;
}

/// Raw block paths of the three logical partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionPaths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl PartitionPaths {
    pub fn get(&self, partition: Partition) -> Option<&str> {
        let path = match partition {
            Partition::System => &self.system,
            Partition::Cache => &self.cache,
            Partition::Data => &self.data,
        };
        path.as_deref()
    }
}

/// Device entry as stored in a patcher configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Codename, e.g. `hammerhead`
    pub id: String,
    /// Marketing name, e.g. `Nexus 5`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub partitions: PartitionPaths,
}

impl DeviceInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for a partition path
    pub fn with_partition(mut self, partition: Partition, path: impl Into<String>) -> Self {
        let path = Some(path.into());
        match partition {
            Partition::System => self.partitions.system = path,
            Partition::Cache => self.partitions.cache = path,
            Partition::Data => self.partitions.data = path,
        }
        self
    }
}

impl Device for DeviceInfo {
    fn partition(&self, partition: Partition) -> Option<&str> {
        self.partitions.get(partition)
    }
}

impl<D: Device + ?Sized> Device for &D {
    fn partition(&self, partition: Partition) -> Option<&str> {
        (**self).partition(partition)
    }
}
