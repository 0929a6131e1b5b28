//! Type-safe partition and operation types
//!
//! Updater-scripts refer to partitions by free text. Once a line has been
//! classified, the rest of the crate only deals with these closed enums.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Logical partition recognised by the rewriter
///
/// Exactly these three are handled. Any other mount target is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Partition {
    System,
    Cache,
    Data,
}

impl Partition {
    /// Name used in updater-scripts and device partition tables
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Canonical absolute mount point handed to the helper
    pub fn mount_point(&self) -> &'static str {
        match self {
            Self::System => "/system",
            Self::Cache => "/cache",
            Self::Data => "/data",
        }
    }
}

/// Filesystem operation redirected through the multiboot helper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Mount,
    Unmount,
    Format,
}
