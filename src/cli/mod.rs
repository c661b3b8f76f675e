//! CLI command definitions and handlers

mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// swiftlens - Graph-powered architecture analysis for Swift codebases
#[derive(Parser, Debug)]
#[command(name = "swiftlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a directory of Swift sources
    Scan {
        /// Path to the codebase root
        path: PathBuf,

        /// Export format: json, dot, mermaid
        #[arg(long, value_parser = ["json", "dot", "mermaid"])]
        export: Option<String>,

        /// Write the export to a file instead of stdout
        #[arg(long, short = 'o', requires = "export")]
        output: Option<PathBuf>,

        /// Run the IR referential-integrity validator
        #[arg(long)]
        validate: bool,

        /// Verbose logging
        #[arg(long, conflicts_with = "quiet")]
        verbose: bool,

        /// Suppress progress and the terminal report
        #[arg(long)]
        quiet: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            path,
            export,
            output,
            validate,
            verbose,
            quiet,
            no_color,
        } => {
            init_logging(verbose, quiet);
            if no_color {
                console::set_colors_enabled(false);
            }
            scan::run(&path, export.as_deref(), output.as_deref(), validate, quiet)
        }
    }
}

/// `RUST_LOG` wins; otherwise the default level follows the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("swiftlens={default_level}")));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
