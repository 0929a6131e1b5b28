//! mbpatch Library
//!
//! Rewrites Android updater-scripts so that mounting, unmounting and
//! formatting `/system`, `/cache` and `/data` go through the multiboot helper,
//! and optionally neutralizes device-identity assertions.

pub mod cli;
pub mod config_file;
pub mod device;
pub mod error;
pub mod patch_info;
pub mod patcher;
pub mod rewriter;
pub mod script;
pub mod types;

// Re-export main types for convenience
pub use config_file::PatcherConfig;
pub use device::{Device, DeviceInfo, PartitionPaths};
pub use error::{PatcherError, Result};
pub use patch_info::{Conditional, DEFAULT_KEY, PatchInfo};
pub use patcher::{AutoPatcher, FileInfo, PatchOutcome, StandardPatcher, UPDATER_SCRIPT};
pub use rewriter::{RewriteReport, RewriteTemplates, ScriptRewriter};
pub use script::Script;
pub use types::{Operation, Partition};
