//! lintcfg CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "lintcfg")]
#[command(version)]
#[command(about = "Merge linter override configuration into a base configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge exclusions and an override configuration into a base configuration
    Merge {
        /// Base configuration file
        #[arg(short = 'b', long, value_name = "FILE")]
        base: PathBuf,

        /// Override configuration file
        #[arg(short = 'c', long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Exclude files with this name pattern from linting (repeatable)
        #[arg(long = "exclude-name", value_name = "NAME")]
        exclude_names: Vec<String>,

        /// Exclude this path and everything below it from linting (repeatable)
        #[arg(long = "exclude-path", value_name = "PATH")]
        exclude_paths: Vec<String>,

        /// Write the merged configuration to FILE instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the merged document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lintcfg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            base,
            config,
            exclude_names,
            exclude_paths,
            output,
        } => commands::merge::execute(commands::merge::MergeArgs {
            base,
            config,
            exclude_names,
            exclude_paths,
            output,
        }),
    }
}
