//! Graphviz DOT reporter
//!
//! One `digraph` with three clusters (files, types, calls). Edge solidity
//! encodes internality: solid edges stay inside the analyzed set, dashed
//! edges leave it. Type nodes are filled by kind.

use crate::ir::TypeKind;
use crate::pipeline::AnalysisResult;
use anyhow::Result;

/// Fill color per type kind
fn kind_color(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Struct => "lightblue",
        TypeKind::Class => "lightyellow",
        TypeKind::Enum => "lightgreen",
        TypeKind::Protocol => "plum",
        TypeKind::Actor => "lightsalmon",
    }
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();
    out.push_str("digraph swiftlens {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [style=filled, fillcolor=white];\n\n");

    // Files
    out.push_str("  subgraph cluster_files {\n");
    out.push_str("    label=\"Files\";\n");
    for node in &result.file_graph.nodes {
        let shape = if node.is_entry_point { "box3d" } else { "box" };
        out.push_str(&format!(
            "    \"file:{}\" [label=\"{}\", shape={}];\n",
            escape(&node.path),
            escape(&node.path),
            shape
        ));
    }
    for edge in &result.file_graph.edges {
        match &edge.resolved_path {
            Some(resolved) => out.push_str(&format!(
                "    \"file:{}\" -> \"file:{}\" [style=solid];\n",
                escape(&edge.from),
                escape(resolved)
            )),
            None => out.push_str(&format!(
                "    \"file:{}\" -> \"mod:{}\" [style=dashed];\n",
                escape(&edge.from),
                escape(&edge.to)
            )),
        }
    }
    out.push_str("  }\n\n");

    // Types
    out.push_str("  subgraph cluster_types {\n");
    out.push_str("    label=\"Types\";\n");
    for node in &result.inheritance_graph.nodes {
        out.push_str(&format!(
            "    \"type:{}\" [label=\"{}\", fillcolor={}];\n",
            escape(&node.name),
            escape(&node.name),
            kind_color(node.kind)
        ));
    }
    for edge in &result.inheritance_graph.edges {
        let style = if edge.is_internal { "solid" } else { "dashed" };
        out.push_str(&format!(
            "    \"type:{}\" -> \"type:{}\" [style={}];\n",
            escape(&edge.from),
            escape(&edge.to),
            style
        ));
    }
    out.push_str("  }\n\n");

    // Calls
    out.push_str("  subgraph cluster_calls {\n");
    out.push_str("    label=\"Calls\";\n");
    for node in &result.call_graph.nodes {
        out.push_str(&format!(
            "    \"fn:{}\" [label=\"{}\", shape=ellipse];\n",
            escape(&node.name),
            escape(&node.name)
        ));
    }
    for edge in &result.call_graph.edges {
        let style = if edge.is_internal { "solid" } else { "dashed" };
        let caller = edge.caller.as_deref().unwrap_or("(top-level)");
        out.push_str(&format!(
            "    \"fn:{}\" -> \"fn:{}\" [style={}];\n",
            escape(caller),
            escape(&edge.callee),
            style
        ));
    }
    out.push_str("  }\n");

    out.push_str("}\n");
    Ok(out)
}
