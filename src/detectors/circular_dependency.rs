//! Circular dependency detector
//!
//! Reports each import cycle found by the file graph's DFS. The cycle is
//! rendered as a module-name chain (`A → B → A`) and anchored at its
//! first file.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::ir::module_name_of;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct CircularDependencyDetector;

impl CircularDependencyDetector {
    pub fn new(_config: &Config) -> Self {
        Self
    }
}

impl Detector for CircularDependencyDetector {
    fn name(&self) -> &'static str {
        "circular-dependency"
    }

    fn description(&self) -> &'static str {
        "Detects import cycles between files"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let findings = ctx
            .files
            .find_cycles()
            .into_iter()
            .map(|cycle| {
                let chain = cycle
                    .iter()
                    .map(|path| module_name_of(path))
                    .collect::<Vec<_>>()
                    .join(" → ");
                let first = cycle.first().cloned().unwrap_or_default();
                Finding::new(
                    self.name(),
                    Severity::Error,
                    format!("Circular import chain: {}", chain),
                )
                .with_file(first)
            })
            .collect();
        Ok(findings)
    }
}
