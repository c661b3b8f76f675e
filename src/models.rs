//! Core data models for swiftlens
//!
//! Findings and their severity classification, shared by the signal
//! detectors, the validator, and the reporters.

use serde::{Deserialize, Serialize};

/// Severity levels for findings
///
/// Severity is a classification attribute on findings; it never influences
/// the process exit code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// An architectural signal finding
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Finding {
    /// Signal name (e.g. `circular-dependency`)
    pub name: String,
    pub severity: Severity,
    pub message: String,
    /// Path of the file the finding points at, when it points at one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Finding {
    pub fn new(name: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            severity,
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Sort findings into the stable report order: severity (error first),
/// then signal name, then file.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.file.cmp(&b.file))
    });
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Error => summary.error += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary
    }
}
