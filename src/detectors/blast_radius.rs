//! Blast radius detector
//!
//! Counts how many files transitively depend on each file (reverse BFS).
//! Changes to a wide-radius file ripple far.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct BlastRadiusDetector {
    warning: usize,
    error: usize,
}

impl BlastRadiusDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("blast-radius", thresholds::BLAST_RADIUS_WARNING),
            error: config.count_error_threshold("blast-radius", thresholds::BLAST_RADIUS_ERROR),
        }
    }
}

impl Detector for BlastRadiusDetector {
    fn name(&self) -> &'static str {
        "blast-radius"
    }

    fn description(&self) -> &'static str {
        "Finds files a large share of the codebase transitively depends on"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let dependents = ctx.files.transitive_dependents(&node.path);
            if dependents < self.warning {
                continue;
            }
            let severity = if dependents >= self.error {
                Severity::Error
            } else {
                Severity::Warning
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!("{} files transitively depend on this file", dependents),
                )
                .with_file(node.path.clone()),
            );
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::Fixture;

    /// Core.swift with `n` direct dependents
    fn fixture_with_dependents(n: usize) -> Fixture {
        let mut files: Vec<(String, String)> = vec![("Core.swift".to_string(), String::new())];
        for i in 0..n {
            files.push((format!("Dep{i}.swift"), "import Core\n".to_string()));
        }
        Fixture::from_owned_sources(files)
    }

    #[test]
    fn test_below_threshold_is_silent() {
        let fx = fixture_with_dependents(4);
        let findings = BlastRadiusDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_warning_then_error() {
        let fx = fixture_with_dependents(5);
        let findings = BlastRadiusDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].file.as_deref(), Some("Core.swift"));

        let fx = fixture_with_dependents(10);
        let findings = BlastRadiusDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_transitive_counting() {
        // Leaf <- Mid <- App1..App4: Leaf has 5 transitive dependents
        let fx = Fixture::from_sources(&[
            ("App1.swift", "import Mid\n"),
            ("App2.swift", "import Mid\n"),
            ("App3.swift", "import Mid\n"),
            ("App4.swift", "import Mid\n"),
            ("Leaf.swift", ""),
            ("Mid.swift", "import Leaf\n"),
        ]);
        let findings = BlastRadiusDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file.as_deref(), Some("Leaf.swift"));
    }
}
