//! Base detector trait and shared context

use crate::graph::{CallGraph, FileGraph, InheritanceGraph};
use crate::ir::Ir;
use crate::models::Finding;
use anyhow::Result;

/// Read-only view of one analysis, handed to every detector
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub ir: &'a Ir,
    pub files: &'a FileGraph,
    pub inheritance: &'a InheritanceGraph,
    pub calls: &'a CallGraph,
}

/// Trait for all architectural signal detectors
///
/// A detector inspects the graphs/IR and returns classified findings. It
/// must not mutate anything and must not fail on malformed input; an empty
/// result is the correct answer for an empty or degenerate subtree.
pub trait Detector: Send + Sync {
    /// Signal name, kebab-case (e.g. `circular-dependency`)
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Run detection and return findings
    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>>;
}
