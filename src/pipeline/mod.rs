//! Analysis pipeline
//!
//! One call, one owned result. Data flows in one direction: walk → parse
//! (parallel, order-stable) → IR build → graph build → signal detection →
//! aggregate. Parsed per-file facts are dropped as soon as the IR vectors
//! exist; only the compact IR persists.

use crate::config::Config;
use crate::detectors;
use crate::graph::{CallGraph, FileGraph, InheritanceGraph};
use crate::ir::{self, Ir};
use crate::models::{Finding, FindingsSummary};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Cached counts for the report header and JSON summary
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub files: usize,
    pub types: usize,
    pub functions: usize,
    pub call_sites: usize,
    pub signals: FindingsSummary,
}

/// The single handoff point to reporters and exporters
pub struct AnalysisResult {
    pub ir: Ir,
    pub file_graph: FileGraph,
    pub inheritance_graph: InheritanceGraph,
    pub call_graph: CallGraph,
    pub findings: Vec<Finding>,
    pub summary: Summary,
}

/// Analyze the Swift sources under `root`.
///
/// `on_file_parsed` is invoked once per input file as the parse stage
/// progresses (progress display hook; pass `|| {}` when unwanted).
pub fn analyze<F>(root: &Path, config: &Config, on_file_parsed: F) -> Result<AnalysisResult>
where
    F: Fn() + Sync,
{
    let start = Instant::now();

    let paths = crate::parsers::collect_swift_files(root, &config.exclude.paths)?;
    info!("Scanning {} Swift file(s) under {}", paths.len(), root.display());

    let stage = crate::parsers::parse_stage(root, &paths, on_file_parsed);
    let ir = ir::build(&stage.parsed);
    drop(stage.parsed);

    let (file_graph, inheritance_graph, call_graph) = crate::graph::build_graphs(&ir);

    let ctx = detectors::AnalysisContext {
        ir: &ir,
        files: &file_graph,
        inheritance: &inheritance_graph,
        calls: &call_graph,
    };
    let catalog = detectors::all_detectors(config);
    let mut findings = detectors::run_all(&catalog, &ctx);

    // Parse failures surface in the same report as the signals
    findings.extend(stage.failures);
    crate::models::sort_findings(&mut findings);

    let summary = Summary {
        files: ir.files.len(),
        types: ir.type_decls.len(),
        functions: ir.function_decls.len(),
        call_sites: ir.call_sites.len(),
        signals: FindingsSummary::from_findings(&findings),
    };

    info!(
        "Analysis complete: {} finding(s) across {} file(s) in {:?}",
        summary.signals.total,
        summary.files,
        start.elapsed()
    );

    Ok(AnalysisResult {
        ir,
        file_graph,
        inheritance_graph,
        call_graph,
        findings,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn write_files(dir: &Path, files: &[(&str, &str)]) {
        for (name, src) in files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, src).unwrap();
        }
    }

    #[test]
    fn test_single_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[("A.swift", "")]);

        let result = analyze(dir.path(), &Config::default(), || {}).unwrap();
        assert_eq!(result.summary.files, 1);
        assert_eq!(result.file_graph.edges.len(), 0);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].name, "dead-file");
        assert_eq!(result.findings[0].severity, Severity::Info);
    }

    #[test]
    fn test_summary_counts_match_ir() {
        let dir = tempfile::tempdir().unwrap();
        write_files(
            dir.path(),
            &[
                ("A.swift", "import B\nstruct S {}\nfunc f() {\n    g()\n}\n"),
                ("B.swift", "func g() {}\n"),
            ],
        );

        let result = analyze(dir.path(), &Config::default(), || {}).unwrap();
        assert_eq!(result.summary.files, result.ir.files.len());
        assert_eq!(result.summary.types, result.ir.type_decls.len());
        assert_eq!(result.summary.functions, result.ir.function_decls.len());
        assert_eq!(result.summary.call_sites, result.ir.call_sites.len());
        assert_eq!(
            result.summary.signals.total,
            result.findings.len()
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = analyze(Path::new("/nonexistent/swiftlens"), &Config::default(), || {});
        assert!(err.is_err());
    }

    #[test]
    fn test_progress_callback_fires_per_file() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[("A.swift", ""), ("B.swift", "")]);

        let count = AtomicUsize::new(0);
        analyze(dir.path(), &Config::default(), || {
            count.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_internal_call_edges_reference_declared_functions() {
        let dir = tempfile::tempdir().unwrap();
        write_files(
            dir.path(),
            &[("A.swift", "func f() {}\nfunc main() {\n    f()\n    print(1)\n}\n")],
        );

        let result = analyze(dir.path(), &Config::default(), || {}).unwrap();
        for edge in result.call_graph.edges.iter().filter(|e| e.is_internal) {
            assert!(result
                .ir
                .function_decls
                .iter()
                .any(|f| f.name == edge.callee));
        }
    }
}
