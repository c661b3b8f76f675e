//! JSON reporter
//!
//! Top-level keys: `files`, `functions`, `graphs` (`callGraph`,
//! `fileDependency`, `inheritance`), `signals`, `summary`, `types`.
//! Serialization goes through `serde_json::Value` so keys come out
//! sorted; together with the pipeline's deterministic ordering this makes
//! repeated runs byte-identical.

use crate::graph::{CallGraph, FileGraph, InheritanceGraph};
use crate::ir::{FunctionDecl, SourceFile, TypeDecl};
use crate::models::Finding;
use crate::pipeline::{AnalysisResult, Summary};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Graphs<'a> {
    call_graph: &'a CallGraph,
    file_dependency: &'a FileGraph,
    inheritance: &'a InheritanceGraph,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [SourceFile],
    functions: &'a [FunctionDecl],
    graphs: Graphs<'a>,
    signals: &'a [Finding],
    summary: &'a Summary,
    types: &'a [TypeDecl],
}

/// Render the full result as pretty-printed JSON with sorted keys.
pub fn render(result: &AnalysisResult) -> Result<String> {
    let report = JsonReport {
        files: &result.ir.files,
        functions: &result.ir.function_decls,
        graphs: Graphs {
            call_graph: &result.call_graph,
            file_dependency: &result.file_graph,
            inheritance: &result.inheritance_graph,
        },
        signals: &result.findings,
        summary: &result.summary,
        types: &result.ir.type_decls,
    };
    // Value maps are BTree-backed, which sorts object keys
    let value = serde_json::to_value(&report)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pipeline;

    fn analyzed(files: &[(&str, &str)]) -> AnalysisResult {
        let dir = tempfile::tempdir().unwrap();
        for (name, src) in files {
            std::fs::write(dir.path().join(name), src).unwrap();
        }
        pipeline::analyze(dir.path(), &Config::default(), || {}).unwrap()
    }

    #[test]
    fn test_top_level_keys() {
        let result = analyzed(&[("A.swift", "struct S {}\n")]);
        let rendered = render(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["files", "functions", "graphs", "signals", "summary", "types"]
        );
        let graph_keys: Vec<&String> = value["graphs"].as_object().unwrap().keys().collect();
        assert_eq!(graph_keys, vec!["callGraph", "fileDependency", "inheritance"]);
    }

    #[test]
    fn test_two_space_indent() {
        let result = analyzed(&[("A.swift", "")]);
        let rendered = render(&result).unwrap();
        assert!(rendered.contains("\n  \"files\""));
    }

    #[test]
    fn test_repeated_render_is_byte_identical() {
        let result = analyzed(&[
            ("A.swift", "import B\nfunc f() {\n    g()\n}\n"),
            ("B.swift", "func g() {}\nclass C {}\n"),
        ]);
        assert_eq!(render(&result).unwrap(), render(&result).unwrap());
    }

    #[test]
    fn test_signal_shape() {
        let result = analyzed(&[("A.swift", "")]);
        let rendered = render(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let signal = &value["signals"][0];
        assert_eq!(signal["name"], "dead-file");
        assert_eq!(signal["severity"], "info");
        assert_eq!(signal["file"], "A.swift");
        assert!(signal["message"].is_string());
    }
}
