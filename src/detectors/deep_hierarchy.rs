//! Deep inheritance hierarchy detector

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct DeepHierarchyDetector {
    warning: usize,
    error: usize,
}

impl DeepHierarchyDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("deep-hierarchy", thresholds::DEEP_HIERARCHY_WARNING),
            error: config.count_error_threshold("deep-hierarchy", thresholds::DEEP_HIERARCHY_ERROR),
        }
    }
}

impl Detector for DeepHierarchyDetector {
    fn name(&self) -> &'static str {
        "deep-hierarchy"
    }

    fn description(&self) -> &'static str {
        "Finds types buried deep in internal inheritance chains"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let depths = ctx.inheritance.depths();
        let mut findings = Vec::new();

        for (node, depth) in ctx.inheritance.nodes.iter().zip(depths) {
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
                    format!("Type `{}` sits at inheritance depth {}", node.name, depth),
                )
                .with_file(node.file_path.clone()),
            );
        }

        Ok(findings)
    }
}
