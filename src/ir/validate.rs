//! Referential-integrity validation of the IR
//!
//! An optional pass, run only on request. Its findings are reported
//! separately from the architectural signals.

use crate::ir::Ir;
use crate::models::{Finding, Severity};
use rustc_hash::{FxHashMap, FxHashSet};

/// Check referential integrity of an IR.
///
/// Reported problems:
/// - declarations or call sites whose `file_path` is not in the file list
/// - call sites whose `containing_function` does not resolve to a declared
///   function in the same file (warning only; module-level calls with no
///   containing function are legitimate)
/// - duplicate record IDs
pub fn validate(ir: &Ir) -> Vec<Finding> {
    let mut findings = Vec::new();

    let known_paths: FxHashSet<&str> = ir.files.iter().map(|f| f.path.as_str()).collect();
    let mut functions_by_file: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();
    for f in &ir.function_decls {
        functions_by_file
            .entry(f.file_path.as_str())
            .or_default()
            .insert(f.name.as_str());
    }

    for t in &ir.type_decls {
        if !known_paths.contains(t.file_path.as_str()) {
            findings.push(
                Finding::new(
                    "dangling-file-path",
                    Severity::Error,
                    format!("Type `{}` references unknown file `{}`", t.name, t.file_path),
                )
                .with_file(t.file_path.clone()),
            );
        }
    }

    for f in &ir.function_decls {
        if !known_paths.contains(f.file_path.as_str()) {
            findings.push(
                Finding::new(
                    "dangling-file-path",
                    Severity::Error,
                    format!(
                        "Function `{}` references unknown file `{}`",
                        f.name, f.file_path
                    ),
                )
                .with_file(f.file_path.clone()),
            );
        }
    }

    for c in &ir.call_sites {
        if !known_paths.contains(c.file_path.as_str()) {
            findings.push(
                Finding::new(
                    "dangling-file-path",
                    Severity::Error,
                    format!(
                        "Call to `{}` references unknown file `{}`",
                        c.called_name, c.file_path
                    ),
                )
                .with_file(c.file_path.clone()),
            );
            continue;
        }
        if let Some(container) = &c.containing_function {
            let resolved = functions_by_file
                .get(c.file_path.as_str())
                .map(|names| names.contains(container.as_str()))
                .unwrap_or(false);
            if !resolved {
                findings.push(
                    Finding::new(
                        "unresolved-containing-function",
                        Severity::Warning,
                        format!(
                            "Call to `{}` at line {} claims containing function `{}`, which is not declared in the file",
                            c.called_name, c.line, container
                        ),
                    )
                    .with_file(c.file_path.clone()),
                );
            }
        }
    }

    let mut seen_ids: FxHashSet<&str> = FxHashSet::default();
    let all_ids = ir
        .type_decls
        .iter()
        .map(|t| t.id.as_str())
        .chain(ir.function_decls.iter().map(|f| f.id.as_str()))
        .chain(ir.call_sites.iter().map(|c| c.id.as_str()));
    for id in all_ids {
        if !seen_ids.insert(id) {
            findings.push(Finding::new(
                "duplicate-id",
                Severity::Error,
                format!("Duplicate record ID `{}`", id),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir;
    use crate::parsers::swift;

    #[test]
    fn test_clean_ir_validates() {
        let parsed = vec![swift::parse_source(
            "struct S {\n    func m() {\n        helper()\n    }\n}\nfunc helper() {}\n",
            "A.swift",
        )];
        let built = ir::build(&parsed);
        assert!(validate(&built).is_empty());
    }

    #[test]
    fn test_dangling_file_path() {
        let parsed = vec![swift::parse_source("struct S {}\n", "A.swift")];
        let mut built = ir::build(&parsed);
        built.type_decls[0].file_path = "Ghost.swift".to_string();
        let findings = validate(&built);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name, "dangling-file-path");
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_unresolved_containing_function_is_warning() {
        let parsed = vec![swift::parse_source(
            "func real() {\n    helper()\n}\n",
            "A.swift",
        )];
        let mut built = ir::build(&parsed);
        built.call_sites[0].containing_function = Some("phantom".to_string());
        let findings = validate(&built);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name, "unresolved-containing-function");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_duplicate_id() {
        let parsed = vec![swift::parse_source("func f() {}\n", "A.swift")];
        let mut built = ir::build(&parsed);
        let mut copy = built.function_decls[0].clone();
        copy.line = 10;
        copy.end_line = 10;
        built.function_decls.push(copy);
        let findings = validate(&built);
        assert!(findings.iter().any(|f| f.name == "duplicate-id"));
    }
}
