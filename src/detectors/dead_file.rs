//! Dead file detector
//!
//! A file is dead when no other file imports its module. Files that still
//! import others rank higher (warning) than fully isolated ones (info):
//! the former carry dependencies that keep dead code wired in.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct DeadFileDetector;

impl DeadFileDetector {
    pub fn new(_config: &Config) -> Self {
        Self
    }
}

impl Detector for DeadFileDetector {
    fn name(&self) -> &'static str {
        "dead-file"
    }

    fn description(&self) -> &'static str {
        "Finds files whose module is never imported by another file"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let imported_elsewhere = ctx
                .files
                .edges
                .iter()
                .any(|e| e.to == node.module_name && e.from != node.path);
            if imported_elsewhere || !ctx.files.is_local_module(&node.module_name) {
                continue;
            }

            let out_degree = ctx.files.out_degree(&node.path);
            let severity = if out_degree > 0 {
                Severity::Warning
            } else {
                Severity::Info
            };
            let message = if out_degree > 0 {
                format!(
                    "Module `{}` is never imported, yet the file still pulls in {} module(s)",
                    node.module_name, out_degree
                )
            } else {
                format!("Module `{}` is never imported", node.module_name)
            };
            findings.push(Finding::new(self.name(), severity, message).with_file(node.path.clone()));
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::Fixture;

    #[test]
    fn test_isolated_file_is_info() {
        let fx = Fixture::from_sources(&[("A.swift", "")]);
        let findings = DeadFileDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].file.as_deref(), Some("A.swift"));
    }

    #[test]
    fn test_dead_file_with_imports_is_warning() {
        let fx = Fixture::from_sources(&[("A.swift", "import B\n"), ("B.swift", "")]);
        let findings = DeadFileDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        // A is dead (warning, it imports B); B is imported so not dead
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file.as_deref(), Some("A.swift"));
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_imported_file_is_not_dead() {
        let fx = Fixture::from_sources(&[("A.swift", "import B\n"), ("B.swift", "")]);
        let findings = DeadFileDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert!(!findings.iter().any(|f| f.file.as_deref() == Some("B.swift")));
    }
}
