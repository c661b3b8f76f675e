//! High instability detector
//!
//! A file that mostly depends outward (`I` near 1) with real coupling is
//! easy to change but fragile under churn in its dependencies. Entry
//! points are expected to look like this, so they only rate info.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::martin::file_metrics;
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct InstabilityDetector {
    threshold: f64,
    min_coupling: usize,
}

impl InstabilityDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            threshold: config.ratio_threshold("high-instability", thresholds::INSTABILITY_THRESHOLD),
            min_coupling: thresholds::MIN_COUPLING,
        }
    }
}

impl Detector for InstabilityDetector {
    fn name(&self) -> &'static str {
        "high-instability"
    }

    fn description(&self) -> &'static str {
        "Finds files with near-total outward coupling (Martin instability)"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let m = file_metrics(ctx, &node.path);
            if m.coupling() < self.min_coupling || m.instability < self.threshold {
                continue;
            }
            let severity = if node.is_entry_point {
                Severity::Info
            } else {
                Severity::Warning
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!(
                        "Instability {:.2} (out {} / in {})",
                        m.instability, m.out_degree, m.in_degree
                    ),
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

    #[test]
    fn test_unstable_file_is_warning() {
        let fx = Fixture::from_sources(&[
            ("A.swift", "import B\nimport C\nimport D\n"),
            ("B.swift", ""),
            ("C.swift", ""),
            ("D.swift", ""),
        ]);
        let findings = InstabilityDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file.as_deref(), Some("A.swift"));
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_entry_point_is_info() {
        let fx = Fixture::from_sources(&[
            ("A.swift", "import B\nimport C\nimport D\n@main\nstruct App {}\n"),
            ("B.swift", ""),
            ("C.swift", ""),
            ("D.swift", ""),
        ]);
        let findings = InstabilityDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn test_low_coupling_is_silent() {
        let fx = Fixture::from_sources(&[("A.swift", "import B\n"), ("B.swift", "")]);
        let findings = InstabilityDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_stable_file_is_silent() {
        let fx = Fixture::from_sources(&[
            ("A.swift", "import Core\n"),
            ("B.swift", "import Core\n"),
            ("C.swift", "import Core\n"),
            ("Core.swift", ""),
        ]);
        let findings = InstabilityDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert!(!findings.iter().any(|f| f.file.as_deref() == Some("Core.swift")));
    }
}
