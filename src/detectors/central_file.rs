//! Central file detector
//!
//! High in-degree: many files import this one directly.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct CentralFileDetector {
    warning: usize,
    error: usize,
}

impl CentralFileDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            warning: config.count_threshold("central-file", thresholds::CENTRAL_FILE_WARNING),
            error: config.count_error_threshold("central-file", thresholds::CENTRAL_FILE_ERROR),
        }
    }
}

impl Detector for CentralFileDetector {
    fn name(&self) -> &'static str {
        "central-file"
    }

    fn description(&self) -> &'static str {
        "Finds files imported directly by many others"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let in_degree = ctx.files.in_degree(&node.path);
            if in_degree < self.warning {
                continue;
            }
            let severity = if in_degree >= self.error {
                Severity::Error
            } else {
                Severity::Warning
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!("Imported by {} files", in_degree),
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

    fn fixture_with_importers(n: usize) -> Fixture {
        let mut files: Vec<(String, String)> = vec![("Hub.swift".to_string(), String::new())];
        for i in 0..n {
            files.push((format!("User{i}.swift"), "import Hub\n".to_string()));
        }
        Fixture::from_owned_sources(files)
    }

    #[test]
    fn test_thresholds() {
        let detector = CentralFileDetector::new(&Config::default());

        assert!(detector.detect(&fixture_with_importers(4).ctx()).unwrap().is_empty());

        let findings = detector.detect(&fixture_with_importers(5).ctx()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);

        let findings = detector.detect(&fixture_with_importers(10).ctx()).unwrap();
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_config_override() {
        let config: Config = toml::from_str("[signals.central-file]\nthreshold = 2\n").unwrap();
        let findings = CentralFileDetector::new(&config)
            .detect(&fixture_with_importers(2).ctx())
            .unwrap();
        assert_eq!(findings.len(), 1);
    }
}
