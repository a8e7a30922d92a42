/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Merge command implementation
 */

//! Merge command implementation.
//!
//! Reads a base configuration and an optional override file, lowers the
//! exclusion flags to exclusion paths, and writes the merged configuration.
//! Nothing is written if any part of the merge fails.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use lintcfg_config::{NamesPaths, OverrideConfig, merge_default_config};

/// Arguments for the merge command
#[derive(Debug)]
pub struct MergeArgs {
    /// Base configuration file
    pub base: PathBuf,
    /// Override configuration file
    pub config: Option<PathBuf>,
    pub exclude_names: Vec<String>,
    pub exclude_paths: Vec<String>,
    /// Output file, stdout when absent
    pub output: Option<PathBuf>,
}

/// Execute the merge command
pub fn execute(args: MergeArgs) -> Result<()> {
    let base = fs::read_to_string(&args.base)
        .with_context(|| format!("failed to read base configuration {}", args.base.display()))?;

    let config = match &args.config {
        Some(path) => {
            debug!(config = %path.display(), "loading override configuration");
            Some(OverrideConfig::from_file(path).with_context(|| {
                format!("failed to load override configuration {}", path.display())
            })?)
        }
        None => None,
    };

    let matchers = NamesPaths::new(args.exclude_names, args.exclude_paths);
    debug!(
        names = matchers.names.len(),
        paths = matchers.paths.len(),
        "lowering exclude matchers"
    );

    let merged = merge_default_config(&base, &matchers, config.as_ref())
        .with_context(|| format!("failed to merge configuration into {}", args.base.display()))?;

    match &args.output {
        Some(path) => {
            fs::write(path, &merged)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), "wrote merged configuration");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(merged.as_bytes())
                .context("failed to write merged configuration to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
