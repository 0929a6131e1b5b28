//! Command-line interface for mbpatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mbpatch - Multiboot updater-script patcher
#[derive(Parser)]
#[command(name = "mbpatch")]
#[command(about = "Redirects updater-script mounts and formats through the multiboot helper")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: print the rewritten script instead of writing it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Patch the updater-script of an extracted ROM in place
    Patch {
        /// Root of the extracted ROM (the directory containing META-INF)
        directory: PathBuf,
        /// Path to the patcher configuration file
        #[arg(short, long)]
        config: PathBuf,
        /// ROM file name used to resolve the patch info key
        /// (defaults to the directory name)
        #[arg(short, long)]
        filename: Option<String>,
    },
    /// Rewrite a single updater-script file
    Rewrite {
        /// Script to rewrite
        script: PathBuf,
        /// Configuration providing the device partition paths
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Neutralize ro.product.device / ro.build.product assertions
        #[arg(short, long)]
        strip_device_checks: bool,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Print the helper invocations lines are rewritten to
    Templates,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
