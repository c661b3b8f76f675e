//! Hot function detector
//!
//! Counts internal call edges per callee name; heavily-called functions
//! are change-amplifiers.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct HotFunctionDetector {
    warning: usize,
    error: usize,
}

impl HotFunctionDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("hot-function", thresholds::HOT_FUNCTION_WARNING),
            error: config.count_error_threshold("hot-function", thresholds::HOT_FUNCTION_ERROR),
        }
    }
}

impl Detector for HotFunctionDetector {
    fn name(&self) -> &'static str {
        "hot-function"
    }

    fn description(&self) -> &'static str {
        "Finds functions called from many internal call sites"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for (name, count) in ctx.calls.hot_functions(self.warning) {
            let severity = if count >= self.error {
                Severity::Error
            } else {
                Severity::Warning
            };
            let file = ctx
                .calls
                .nodes
                .iter()
                .find(|n| n.name == name)
                .map(|n| n.file_path.clone());
            let mut finding = Finding::new(
                self.name(),
                severity,
                format!("Function `{}` is called {} times", name, count),
            );
            if let Some(file) = file {
                finding = finding.with_file(file);
            }
            findings.push(finding);
        }

        Ok(findings)
    }
}
