//! Low abstractness detector
//!
//! A fully concrete file (no protocols) that many files import gives its
//! dependents nothing to depend on but implementation detail.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::martin::file_metrics;
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct AbstractnessDetector {
    min_in_degree: usize,
}

impl AbstractnessDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            min_in_degree: config.count_threshold(
                "low-abstractness",
                thresholds::LOW_ABSTRACTNESS_MIN_IN_DEGREE,
            ),
        }
    }
}

impl Detector for AbstractnessDetector {
    fn name(&self) -> &'static str {
        "low-abstractness"
    }

    fn description(&self) -> &'static str {
        "Finds fully concrete files that many other files depend on"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let m = file_metrics(ctx, &node.path);
            let Some(abstractness) = m.abstractness else {
                continue;
            };
            if abstractness > 0.0 || m.in_degree < self.min_in_degree {
                continue;
            }
            findings.push(
                Finding::new(
                    self.name(),
                    Severity::Info,
                    format!(
                        "Fully concrete file with {} dependents; consider a protocol seam",
                        m.in_degree
                    ),
                )
                .with_file(node.path.clone()),
            );
        }

        Ok(findings)
    }
}
