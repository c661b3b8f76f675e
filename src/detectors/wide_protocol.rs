//! Wide protocol detector
//!
//! A protocol with many direct conformers is a contract everyone signed;
//! each change forces a sweep across the codebase.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::ir::TypeKind;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct WideProtocolDetector {
    warning: usize,
    error: usize,
}

impl WideProtocolDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("wide-protocol", thresholds::WIDE_PROTOCOL_WARNING),
            error: config.count_error_threshold("wide-protocol", thresholds::WIDE_PROTOCOL_ERROR),
        }
    }
}

impl Detector for WideProtocolDetector {
    fn name(&self) -> &'static str {
        "wide-protocol"
    }

    fn description(&self) -> &'static str {
        "Finds protocols with an excessive number of conformers"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in ctx
            .inheritance
            .nodes
            .iter()
            .filter(|n| n.kind == TypeKind::Protocol)
        {
            let conformers = ctx.inheritance.subtypes(&node.name).len();
            if conformers < self.warning {
                continue;
            }
            let severity = if conformers >= self.error {
                Severity::Error
            } else {
                Severity::Warning
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!("Protocol `{}` has {} conformers", node.name, conformers),
                )
                .with_file(node.file_path.clone()),
            );
        }

        Ok(findings)
    }
}
