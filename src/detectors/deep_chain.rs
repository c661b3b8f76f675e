//! Deep import chain detector
//!
//! Memoized forward depth over resolved imports. Unresolved imports are
//! leaves and cycles contribute 0, matching the inheritance-depth rule.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct DeepChainDetector {
    warning: usize,
    error: usize,
}

impl DeepChainDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("deep-chain", thresholds::DEEP_CHAIN_WARNING),
            error: config.count_error_threshold("deep-chain", thresholds::DEEP_CHAIN_ERROR),
        }
    }
}

impl Detector for DeepChainDetector {
    fn name(&self) -> &'static str {
        "deep-chain"
    }

    fn description(&self) -> &'static str {
        "Finds files at the top of long import chains"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let depths = ctx.files.depths();
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let depth = depths.get(&node.path).copied().unwrap_or(0);
            if depth < self.warning {
                continue;
            }
            let severity = if depth >= self.error {
                Severity::Error
            } else {
                Severity::Warning
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!("Import chain below this file is {} levels deep", depth),
                )
                .with_file(node.path.clone()),
            );
        }

        Ok(findings)
    }
}
