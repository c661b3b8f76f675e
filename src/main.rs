//! swiftlens - Graph-powered architecture analysis for Swift codebases
//!
//! Scans a directory of Swift sources, lowers them into a compact IR,
//! derives file-dependency, inheritance, and call graphs, and reports
//! architectural signals as text, JSON, Graphviz DOT, or Mermaid.

mod cli;
mod config;
mod detectors;
mod errors;
mod graph;
mod ir;
mod models;
mod parsers;
mod pipeline;
mod reporters;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
