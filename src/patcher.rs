//! Autopatchers.
//!
//! An autopatcher declares which files of an extracted ROM it reads and
//! creates, then patches them in place. The surrounding tooling uses the
//! declarations to decide what to extract before calling `patch_files`.
//!
//! # Contract
//!
//! - `id()`: stable identifier of the patcher
//! - `new_files()`: paths (relative to the ROM root) the patcher creates
//! - `existing_files()`: paths the patcher reads and rewrites
//! - `patch_files()`: does the work; nothing is written unless rewriting
//!   completed

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::device::DeviceInfo;
use crate::error::{PatcherError, Result};
use crate::patch_info::PatchInfo;
use crate::rewriter::{RewriteReport, ScriptRewriter};

/// Location of the updater-script inside a ROM zip.
pub const UPDATER_SCRIPT: &str = "META-INF/com/google/android/updater-script";

pub trait AutoPatcher {
    /// Identifier of this patcher.
    fn id(&self) -> &'static str;

    /// Files this patcher creates, relative to the ROM root.
    fn new_files(&self) -> Vec<String>;

    /// Files this patcher reads and rewrites, relative to the ROM root.
    fn existing_files(&self) -> Vec<String>;

    /// Last error recorded by the patcher, if any.
    fn error(&self) -> Option<&PatcherError> {
        None
    }

    /// Patch the extracted ROM at `directory`.
    fn patch_files(&self, directory: &Path, boot_images: &[PathBuf]) -> Result<()>;
}

/// The ROM file being patched, and what it targets.
#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    /// ROM file name, used to resolve the patch info key
    pub filename: String,
    pub device: DeviceInfo,
    pub patch_info: PatchInfo,
}

/// Result of rewriting one updater-script.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub path: PathBuf,
    /// Patch info key resolved from the file name
    pub key: String,
    pub strip_device_checks: bool,
    pub contents: Vec<u8>,
    pub report: RewriteReport,
}

/// Redirects updater-script mounts and formats through the multiboot helper.
#[derive(Debug, Clone)]
pub struct StandardPatcher {
    info: FileInfo,
    rewriter: ScriptRewriter,
}

impl StandardPatcher {
    pub const ID: &'static str = "StandardPatcher";

    pub fn new(info: FileInfo) -> Result<Self> {
        Ok(Self {
            info,
            rewriter: ScriptRewriter::new()?,
        })
    }

    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Whether device checks are stripped for this ROM, and under which key.
    pub fn device_check_decision(&self) -> Result<(String, bool)> {
        let patch_info = &self.info.patch_info;
        let key = patch_info.key_from_filename(&self.info.filename)?;
        let strip = !patch_info.device_check(&key);
        Ok((key, strip))
    }

    /// Read and rewrite the updater-script without writing it back.
    pub fn plan(&self, directory: &Path) -> Result<PatchOutcome> {
        let path = directory.join(UPDATER_SCRIPT);
        debug!("Reading {}", path.display());
        let original = fs::read(&path).map_err(|e| PatcherError::io(&path, e))?;

        let (key, strip_device_checks) = self.device_check_decision()?;
        debug!(
            "Patch info key for {:?} is {:?} (strip device checks: {})",
            self.info.filename, key, strip_device_checks
        );

        let (contents, report) =
            self.rewriter
                .rewrite_with_report(&original, &self.info.device, strip_device_checks);

        Ok(PatchOutcome {
            path,
            key,
            strip_device_checks,
            contents,
            report,
        })
    }

    /// Rewrite the updater-script in place.
    pub fn patch(&self, directory: &Path) -> Result<PatchOutcome> {
        let outcome = self.plan(directory)?;
        fs::write(&outcome.path, &outcome.contents)
            .map_err(|e| PatcherError::io(&outcome.path, e))?;
        info!("Patched {} ({})", outcome.path.display(), outcome.report);
        Ok(outcome)
    }
}

impl AutoPatcher for StandardPatcher {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn new_files(&self) -> Vec<String> {
        Vec::new()
    }

    fn existing_files(&self) -> Vec<String> {
        vec![UPDATER_SCRIPT.to_string()]
    }

    /// Boot images are not touched.
    fn patch_files(&self, directory: &Path, _boot_images: &[PathBuf]) -> Result<()> {
        self.patch(directory).map(|_| ())
    }
}
