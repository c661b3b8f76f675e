//! Unused function detector
//!
//! Functions never referenced by an internal call site. Lifecycle and
//! framework entry points that are invoked implicitly are ignored by name
//! or prefix.

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::models::{Finding, Severity};
use anyhow::Result;

/// Called implicitly (entry points, visitors, protocol witnesses)
const IGNORED_NAMES: &[&str] = &["main", "visit", "visitPost", "run", "hash", "encode", "decode"];

/// Name prefixes for implicitly-invoked functions
const IGNORED_PREFIXES: &[&str] = &["init", "test", "setUp", "tearDown"];

pub struct UnusedFunctionDetector;

impl UnusedFunctionDetector {
    pub fn new(_config: &Config) -> Self {
        Self
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_NAMES.contains(&name) || IGNORED_PREFIXES.iter().any(|p| name.starts_with(p))
    }
}

impl Detector for UnusedFunctionDetector {
    fn name(&self) -> &'static str {
        "unused-function"
    }

    fn description(&self) -> &'static str {
        "Finds functions never called from internal code"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let findings = ctx
            .calls
            .unused_functions()
            .into_iter()
            .filter(|node| !Self::is_ignored(&node.name))
            .map(|node| {
                Finding::new(
                    self.name(),
                    Severity::Info,
                    format!("Function `{}` is never called", node.name),
                )
                .with_file(node.file_path.clone())
            })
            .collect();
        Ok(findings)
    }
}
