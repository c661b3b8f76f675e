//! Source fact extraction for Swift files
//!
//! This module yields the raw syntactic facts the IR builder consumes:
//! imports, type and function declaration headers, call sites, and the
//! entry-point marker. Facts are extracted per file by a line-oriented
//! scanner; nothing here resolves names across files.

pub mod swift;

use crate::errors::ScanError;
use crate::ir::{Accessibility, Parameter, TypeKind};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single import clause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    /// Dotted module path, concatenated (`A.B.C`)
    pub module_name: String,
    /// Whether the import carries `@testable`
    pub is_testable: bool,
    pub line: u32,
}

/// Raw facts for one type declaration, before ID assignment
#[derive(Debug, Clone, Default)]
pub struct RawTypeDecl {
    pub name: String,
    pub kind: TypeKind,
    /// Inheritance-clause entries, verbatim and unresolved
    pub inherited_types: Vec<String>,
    pub accessibility: Accessibility,
    pub line: u32,
    pub end_line: u32,
    /// Attribute names without the leading `@`
    pub attributes: Vec<String>,
    /// Generic parameter names only, no constraints
    pub generic_parameters: Vec<String>,
}

/// Raw facts for one function declaration, before ID assignment
#[derive(Debug, Clone, Default)]
pub struct RawFunctionDecl {
    pub name: String,
    /// Canonical form: `func <name><generics>(<params>) [async] [throws] [-> ret]`
    pub signature: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_throws: bool,
    pub is_mutating: bool,
    pub line: u32,
    pub end_line: u32,
    /// Name of the nearest enclosing type declaration, if any
    pub containing_type: Option<String>,
}

/// Raw facts for one call expression
#[derive(Debug, Clone, Default)]
pub struct RawCallSite {
    /// Textual base name of the callee (member name for a member access)
    pub called_name: String,
    pub line: u32,
    /// Name of the nearest enclosing function declaration, if any
    pub containing_function: Option<String>,
}

/// Everything extracted from one source file
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Input-relative path
    pub path: String,
    pub imports: Vec<ImportInfo>,
    pub types: Vec<RawTypeDecl>,
    pub functions: Vec<RawFunctionDecl>,
    pub call_sites: Vec<RawCallSite>,
    pub has_entry_point_attribute: bool,
}

/// Collect all `.swift` files under `root`, gitignore-aware, sorted by path.
///
/// The sorted order is load-bearing: IDs and the module-collision tie-breaker
/// both depend on it.
pub fn collect_swift_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(root).build() {
        let entry = entry.map_err(|e| ScanError::CannotEnumerate {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("swift") {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        if is_excluded(rel, exclude) {
            debug!("Excluding {}", rel.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// A relative path is excluded when any configured entry matches one of its
/// components or prefixes.
fn is_excluded(rel: &Path, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let rel_str = rel.to_string_lossy();
    exclude.iter().any(|pat| {
        let pat = pat.trim_end_matches('/');
        rel_str.starts_with(pat)
            || rel
                .components()
                .any(|c| c.as_os_str().to_string_lossy() == pat)
    })
}

/// Outcome of the parallel parse stage
pub struct ParseStageResult {
    /// Parsed files in input order (order-stable for ID determinism)
    pub parsed: Vec<ParsedFile>,
    /// `parse-error` findings for skipped files
    pub failures: Vec<crate::models::Finding>,
}

/// Parse every file in parallel, preserving input order in the output.
///
/// Read and scan failures never abort the stage: the file is skipped and a
/// `parse-error` warning finding is recorded for it.
pub fn parse_stage<F>(root: &Path, files: &[PathBuf], on_parsed: F) -> ParseStageResult
where
    F: Fn() + Sync,
{
    let results: Vec<Result<ParsedFile, ScanError>> = files
        .par_iter()
        .map(|path| {
            let result = parse_file(root, path);
            on_parsed();
            result
        })
        .collect();

    let mut parsed = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(file) => parsed.push(file),
            Err(err) => {
                tracing::warn!("Skipping {}: {}", path.display(), err);
                failures.push(
                    crate::models::Finding::new(
                        "parse-error",
                        crate::models::Severity::Warning,
                        format!("File could not be analyzed: {}", err),
                    )
                    .with_file(relative_path(root, path)),
                );
            }
        }
    }

    ParseStageResult { parsed, failures }
}

/// Parse a single file into raw facts.
///
/// Invalid UTF-8 is a parse failure (the scanner needs text); any other
/// read problem is an I/O failure.
pub fn parse_file(root: &Path, path: &Path) -> Result<ParsedFile, ScanError> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Err(ScanError::Parse {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ScanError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    Ok(swift::parse_source(&source, &relative_path(root, path)))
}

/// Input-relative display path, forward slashes on every platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("B.swift"), "import A\n").unwrap();
        std::fs::write(dir.path().join("A.swift"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_swift_files(dir.path(), &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.swift", "B.swift"]);
    }

    #[test]
    fn test_collect_missing_path() {
        let err = collect_swift_files(Path::new("/nonexistent/swiftlens"), &[]).unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(_)));
    }

    #[test]
    fn test_exclude_by_component() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Pods")).unwrap();
        std::fs::write(dir.path().join("Pods/Dep.swift"), "").unwrap();
        std::fs::write(dir.path().join("App.swift"), "").unwrap();

        let files = collect_swift_files(dir.path(), &["Pods".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("App.swift"));
    }

    #[test]
    fn test_parse_stage_records_failures_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A.swift"), "import B\n").unwrap();
        // Invalid UTF-8 forces a read error
        std::fs::write(dir.path().join("Bad.swift"), [0xff, 0xfe, 0x00]).unwrap();

        let files = collect_swift_files(dir.path(), &[]).unwrap();
        let result = parse_stage(dir.path(), &files, || {});
        assert_eq!(result.parsed.len(), 1);
        assert_eq!(result.parsed[0].path, "A.swift");
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "parse-error");
        assert_eq!(result.failures[0].file.as_deref(), Some("Bad.swift"));
    }
}
