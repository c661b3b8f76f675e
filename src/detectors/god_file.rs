//! God file detector
//!
//! High out-degree: the file imports a large slice of the world.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct GodFileDetector {
    warning: usize,
    error: usize,
}

impl GodFileDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("god-file", thresholds::GOD_FILE_WARNING),
            error: config.count_error_threshold("god-file", thresholds::GOD_FILE_ERROR),
        }
    }
}

impl Detector for GodFileDetector {
    fn name(&self) -> &'static str {
        "god-file"
    }

    fn description(&self) -> &'static str {
        "Finds files that import an excessive number of modules"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let out_degree = ctx.files.out_degree(&node.path);
            if out_degree < self.warning {
                continue;
            }
            let severity = if out_degree >= self.error {
                Severity::Error
            } else {
                Severity::Warning
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!("Imports {} modules", out_degree),
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

    fn fixture_with_imports(n: usize) -> Fixture {
        let imports: String = (0..n).map(|i| format!("import Mod{i}\n")).collect();
        let mut files: Vec<(String, String)> = vec![("G.swift".to_string(), imports)];
        for i in 0..n {
            files.push((format!("Mod{i}.swift"), String::new()));
        }
        Fixture::from_owned_sources(files)
    }

    #[test]
    fn test_thresholds() {
        let detector = GodFileDetector::new(&Config::default());

        assert!(detector.detect(&fixture_with_imports(9).ctx()).unwrap().is_empty());

        let findings = detector.detect(&fixture_with_imports(10).ctx()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].file.as_deref(), Some("G.swift"));

        let findings = detector.detect(&fixture_with_imports(16).ctx()).unwrap();
        assert_eq!(findings[0].severity, Severity::Error);
    }
}
