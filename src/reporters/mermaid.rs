//! Mermaid reporter
//!
//! Three flowchart blocks: files (LR), inheritance (BT), calls (LR).
//! Mermaid identifiers cannot carry path punctuation, so identifiers are
//! sanitized; labels keep the original text.

use crate::ir::TypeKind;
use crate::pipeline::AnalysisResult;
use anyhow::Result;

/// Replace `[-./ ():]` with `_`; an identifier that sanitizes to nothing
/// becomes the literal `unknown`.
fn sanitize(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| {
            if matches!(c, '-' | '.' | '/' | ' ' | '(' | ')' | ':') {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// Node rendering per type kind
fn type_node(name: &str, kind: TypeKind) -> String {
    let id = sanitize(name);
    match kind {
        TypeKind::Struct => format!("{}({})", id, name),
        TypeKind::Class => format!("{}[{}]", id, name),
        TypeKind::Enum => format!("{}([{}])", id, name),
        TypeKind::Protocol => format!("{}{{{{{}}}}}", id, name),
        TypeKind::Actor => format!("{}[[{}]]", id, name),
    }
}

pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();

    // Files
    out.push_str("flowchart LR\n");
    for node in &result.file_graph.nodes {
        out.push_str(&format!(
            "    {}[\"{}\"]\n",
            sanitize(&node.path),
            node.path
        ));
    }
    for edge in &result.file_graph.edges {
        match &edge.resolved_path {
            Some(resolved) => out.push_str(&format!(
                "    {} --> {}\n",
                sanitize(&edge.from),
                sanitize(resolved)
            )),
            None => out.push_str(&format!(
                "    {} -.-> {}\n",
                sanitize(&edge.from),
                sanitize(&edge.to)
            )),
        }
    }
    out.push('\n');

    // Inheritance, bottom-up
    out.push_str("flowchart BT\n");
    for node in &result.inheritance_graph.nodes {
        out.push_str(&format!("    {}\n", type_node(&node.name, node.kind)));
    }
    for edge in &result.inheritance_graph.edges {
        let arrow = if edge.is_internal { "-->" } else { "-.->" };
        out.push_str(&format!(
            "    {} {} {}\n",
            sanitize(&edge.from),
            arrow,
            sanitize(&edge.to)
        ));
    }
    out.push('\n');

    // Calls
    out.push_str("flowchart LR\n");
    for node in &result.call_graph.nodes {
        out.push_str(&format!("    {}[\"{}\"]\n", sanitize(&node.name), node.name));
    }
    for edge in &result.call_graph.edges {
        let arrow = if edge.is_internal { "-->" } else { "-.->" };
        let caller = edge.caller.as_deref().unwrap_or("top level");
        out.push_str(&format!(
            "    {} {} {}\n",
            sanitize(caller),
            arrow,
            sanitize(&edge.callee)
        ));
    }

    Ok(out)
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
    fn test_sanitize() {
        assert_eq!(sanitize("Sources/App/Main.swift"), "Sources_App_Main_swift");
        assert_eq!(sanitize("f(x: Int)"), "f_x__Int_");
        assert_eq!(sanitize(""), "unknown");
    }

    #[test]
    fn test_three_blocks_with_directions() {
        let result = analyzed(&[
            ("A.swift", "import B\nclass C: P {}\n"),
            ("B.swift", "protocol P {}\n"),
        ]);
        let mermaid = render(&result).unwrap();
        let blocks: Vec<&str> = mermaid
            .lines()
            .filter(|l| l.starts_with("flowchart"))
            .collect();
        assert_eq!(blocks, vec!["flowchart LR", "flowchart BT", "flowchart LR"]);
    }

    #[test]
    fn test_internal_and_external_arrows() {
        let result = analyzed(&[("A.swift", "import B\nimport UIKit\n"), ("B.swift", "")]);
        let mermaid = render(&result).unwrap();
        assert!(mermaid.contains("    A_swift --> B_swift\n"));
        assert!(mermaid.contains("    A_swift -.-> UIKit\n"));
    }

    #[test]
    fn test_type_shapes() {
        let result = analyzed(&[(
            "A.swift",
            "struct S {}\nclass C {}\nenum E {}\nprotocol P {}\nactor X {}\n",
        )]);
        let mermaid = render(&result).unwrap();
        assert!(mermaid.contains("    S(S)\n"));
        assert!(mermaid.contains("    C[C]\n"));
        assert!(mermaid.contains("    E([E])\n"));
        assert!(mermaid.contains("    P{{P}}\n"));
        assert!(mermaid.contains("    X[[X]]\n"));
    }
}
