//! Output reporters for analysis results
//!
//! - `text` — styled terminal summary (default)
//! - `json` — machine-readable export, keys sorted, reproducible
//! - `dot` — Graphviz digraph with one cluster per graph
//! - `mermaid` — three Mermaid flowchart blocks

mod dot;
mod json;
mod mermaid;
mod text;

pub use text::render_validation;

use crate::pipeline::AnalysisResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Dot,
    Mermaid,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            "mermaid" => Ok(OutputFormat::Mermaid),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: json, dot, mermaid",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
        }
    }
}

/// Render an analysis result in the requested format.
pub fn render(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(result),
        OutputFormat::Json => json::render(result),
        OutputFormat::Dot => dot::render(result),
        OutputFormat::Mermaid => mermaid::render(result),
    }
}
