//! mbpatch - Main entry point
//!
//! Patches updater-scripts of extracted ROMs so they can be installed to a
//! secondary multiboot slot.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mbpatch::cli::{Cli, Commands};
use mbpatch::{
    DeviceInfo, Operation, Partition, PatcherConfig, ScriptRewriter, StandardPatcher,
};

/// Initialize the logger with appropriate settings
fn init_logger() {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Patch {
            directory,
            config,
            filename,
        } => run_patch(&directory, &config, filename, cli.dry_run)?,
        Commands::Rewrite {
            script,
            config,
            strip_device_checks,
            output,
        } => run_rewrite(
            &script,
            config.as_deref(),
            strip_device_checks,
            output.as_deref(),
            cli.dry_run,
        )?,
        Commands::Validate { config } => {
            info!("Validating configuration file: {:?}", config);
            let loaded = PatcherConfig::load_from_file(&config);
            match loaded.and_then(|c| c.validate().map(|_| c)) {
                Ok(c) => {
                    info!("Configuration validation successful");
                    println!("✓ Configuration file is valid (device: {})", c.device.id);
                }
                Err(e) => {
                    error!("Configuration validation failed: {:#}", e);
                    eprintln!("✗ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Templates => print_templates()?,
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<PatcherConfig> {
    let config = PatcherConfig::load_from_file(path)?;
    config.validate()?;
    info!("Loaded configuration for device {}", config.device.id);
    Ok(config)
}

/// Patch an extracted ROM directory
fn run_patch(
    directory: &Path,
    config_path: &Path,
    filename: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let filename = filename.unwrap_or_else(|| {
        directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let patcher = StandardPatcher::new(config.file_info(filename))?;

    if dry_run {
        let outcome = patcher.plan(directory)?;
        info!(
            "Dry run: {} not written ({})",
            outcome.path.display(),
            outcome.report
        );
        io::stdout()
            .write_all(&outcome.contents)
            .context("Failed to write script to stdout")?;
        return Ok(());
    }

    let outcome = patcher.patch(directory)?;
    println!("✓ Patched {}", outcome.path.display());
    println!("  Key:           {}", outcome.key);
    println!("  Device checks: {}", if outcome.strip_device_checks { "stripped" } else { "kept" });
    println!("  Rewritten:     {} line(s) ({})", outcome.report.total(), outcome.report);
    Ok(())
}

/// Rewrite a single script file
fn run_rewrite(
    script: &Path,
    config_path: Option<&Path>,
    strip_device_checks: bool,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let device = match config_path {
        Some(path) => load_config(path)?.device,
        None => DeviceInfo::new("generic"),
    };

    let contents =
        fs::read(script).with_context(|| format!("Failed to read script {:?}", script))?;
    let rewriter = ScriptRewriter::new()?;
    let (rewritten, report) = rewriter.rewrite_with_report(&contents, &device, strip_device_checks);
    info!("Rewrote {:?} ({})", script, report);

    match output {
        Some(path) if !dry_run => fs::write(path, &rewritten)
            .with_context(|| format!("Failed to write script to {:?}", path))?,
        _ => io::stdout()
            .write_all(&rewritten)
            .context("Failed to write script to stdout")?,
    }
    Ok(())
}

fn print_templates() -> Result<()> {
    let rewriter = ScriptRewriter::new()?;
    let templates = rewriter.templates();
    for operation in Operation::iter() {
        for partition in Partition::iter() {
            println!("{}", templates.render(operation, partition));
        }
    }
    Ok(())
}
