//! Architectural signal detectors
//!
//! Each signal lives in its own module and implements [`base::Detector`].
//! The engine runs the catalog sequentially over the immutable context and
//! returns one flat, stably-sorted finding list.

pub mod base;
pub mod martin;
pub mod thresholds;

mod abstractness;
mod blast_radius;
mod central_file;
mod circular_dependency;
mod dead_file;
mod deep_chain;
mod deep_hierarchy;
mod god_file;
mod hot_function;
mod instability;
mod main_sequence;
mod unused_function;
mod wide_protocol;

pub use base::{AnalysisContext, Detector};

use crate::config::Config;
use crate::models::{self, Finding};
use tracing::{debug, warn};

/// The full signal catalog, in registration order.
pub fn all_detectors(config: &Config) -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(dead_file::DeadFileDetector::new(config)),
        Box::new(circular_dependency::CircularDependencyDetector::new(config)),
        Box::new(blast_radius::BlastRadiusDetector::new(config)),
        Box::new(central_file::CentralFileDetector::new(config)),
        Box::new(god_file::GodFileDetector::new(config)),
        Box::new(deep_chain::DeepChainDetector::new(config)),
        Box::new(deep_hierarchy::DeepHierarchyDetector::new(config)),
        Box::new(wide_protocol::WideProtocolDetector::new(config)),
        Box::new(hot_function::HotFunctionDetector::new(config)),
        Box::new(unused_function::UnusedFunctionDetector::new(config)),
        Box::new(instability::InstabilityDetector::new(config)),
        Box::new(abstractness::AbstractnessDetector::new(config)),
        Box::new(main_sequence::MainSequenceDetector::new(config)),
    ]
}

/// Run every detector and return findings in stable report order
/// (severity, then signal name, then file).
///
/// A failing detector is logged and skipped; detection never aborts the
/// pipeline.
pub fn run_all(detectors: &[Box<dyn Detector>], ctx: &AnalysisContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    for detector in detectors {
        debug!("Running detector: {}", detector.name());
        match detector.detect(ctx) {
            Ok(found) => {
                debug!("Detector {} found {} finding(s)", detector.name(), found.len());
                findings.extend(found);
            }
            Err(err) => warn!("Detector {} failed: {}", detector.name(), err),
        }
    }

    models::sort_findings(&mut findings);
    findings
}
