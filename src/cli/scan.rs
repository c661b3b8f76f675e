//! Scan command implementation
//!
//! Orchestrates one analysis: load configuration, run the pipeline with a
//! progress bar over the parse stage, optionally validate the IR, then
//! report or export. Exit code reflects only I/O and setup failures;
//! findings never fail the process.

use crate::config::Config;
use crate::ir::validate;
use crate::pipeline;
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::str::FromStr;

pub fn run(
    path: &Path,
    export: Option<&str>,
    output: Option<&Path>,
    run_validator: bool,
    quiet: bool,
) -> Result<()> {
    let config = Config::load(path);

    let progress = make_progress(quiet);
    let result = pipeline::analyze(path, &config, || {
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    if run_validator {
        let problems = validate::validate(&result.ir);
        // Stderr keeps validator output clear of the export stream
        eprint!("{}", reporters::render_validation(&problems));
    }

    match export {
        Some(format) => {
            let format = OutputFormat::from_str(format)?;
            let rendered = reporters::render(&result, format)?;
            match output {
                Some(target) => {
                    std::fs::write(target, &rendered)
                        .with_context(|| format!("Failed to write {}", target.display()))?;
                    if !quiet {
                        eprintln!(
                            "{} {}",
                            style("Wrote").green(),
                            style(target.display()).bold()
                        );
                    }
                }
                None => println!("{}", rendered),
            }
        }
        None => {
            if !quiet {
                print!("{}", reporters::render(&result, OutputFormat::Text)?);
            }
        }
    }

    Ok(())
}

/// Hidden when quiet or when stderr is not a terminal.
fn make_progress(quiet: bool) -> ProgressBar {
    if quiet || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} parsing {pos} file(s)")
            .expect("invalid progress template"),
    );
    bar
}
