//! Call graph
//!
//! One node per function declaration, one edge per call site. Callees are
//! matched to internal functions by base name; member access only keeps
//! the member name, so resolution is textual, not semantic.

use crate::ir::Ir;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
    pub name: String,
    pub file_path: String,
    pub line: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEdge {
    /// Calling function name; absent for a module-level call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    pub callee: String,
    pub is_internal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallGraph {
    pub nodes: Vec<FunctionNode>,
    pub edges: Vec<CallEdge>,
    #[serde(skip)]
    declared_names: FxHashSet<String>,
}

impl CallGraph {
    pub fn build(ir: &Ir) -> Self {
        let declared_names: FxHashSet<String> = ir
            .function_decls
            .iter()
            .map(|f| f.name.clone())
            .collect();

        let nodes = ir
            .function_decls
            .iter()
            .map(|f| FunctionNode {
                name: f.name.clone(),
                file_path: f.file_path.clone(),
                line: f.line,
            })
            .collect();

        let edges = ir
            .call_sites
            .iter()
            .map(|c| CallEdge {
                caller: c.containing_function.clone(),
                callee: c.called_name.clone(),
                is_internal: declared_names.contains(&c.called_name),
            })
            .collect();

        CallGraph {
            nodes,
            edges,
            declared_names,
        }
    }

    /// Internal call count per callee name.
    fn internal_call_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for edge in self.edges.iter().filter(|e| e.is_internal) {
            *counts.entry(edge.callee.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Callee names with at least `threshold` internal calls, most-called
    /// first (name breaks ties for a stable order).
    pub fn hot_functions(&self, threshold: usize) -> Vec<(String, usize)> {
        let mut hot: Vec<(String, usize)> = self
            .internal_call_counts()
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        hot.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        hot
    }

    /// Function nodes whose name never appears as an internal callee.
    pub fn unused_functions(&self) -> Vec<&FunctionNode> {
        let called: FxHashSet<&str> = self
            .edges
            .iter()
            .filter(|e| e.is_internal)
            .map(|e| e.callee.as_str())
            .collect();
        self.nodes
            .iter()
            .filter(|n| !called.contains(n.name.as_str()))
            .collect()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared_names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir;
    use crate::parsers::swift;

    fn graph_from(files: &[(&str, &str)]) -> CallGraph {
        let parsed: Vec<_> = files
            .iter()
            .map(|(path, src)| swift::parse_source(src, path))
            .collect();
        CallGraph::build(&ir::build(&parsed))
    }

    #[test]
    fn test_internal_edges_reference_declared_functions() {
        let cg = graph_from(&[(
            "A.swift",
            "func helper() {}\nfunc top() {\n    helper()\n    print(1)\n}\n",
        )]);
        for edge in cg.edges.iter().filter(|e| e.is_internal) {
            assert!(cg.is_declared(&edge.callee));
        }
        let external = cg.edges.iter().find(|e| e.callee == "print").unwrap();
        assert!(!external.is_internal);
    }

    #[test]
    fn test_hot_functions_sorted_by_count() {
        let src = "func a() {}\nfunc b() {}\nfunc top() {\n    a()\n    a()\n    a()\n    b()\n    b()\n}\n";
        let cg = graph_from(&[("A.swift", src)]);
        let hot = cg.hot_functions(2);
        assert_eq!(hot, vec![("a".to_string(), 3), ("b".to_string(), 2)]);
        assert!(cg.hot_functions(4).is_empty());
    }

    #[test]
    fn test_unused_functions() {
        let cg = graph_from(&[(
            "A.swift",
            "func used() {}\nfunc unused() {}\nfunc top() {\n    used()\n}\n",
        )]);
        let unused: Vec<&str> = cg.unused_functions().iter().map(|n| n.name.as_str()).collect();
        assert!(unused.contains(&"unused"));
        assert!(unused.contains(&"top"));
        assert!(!unused.contains(&"used"));
    }

    #[test]
    fn test_module_level_call_has_no_caller() {
        let cg = graph_from(&[("A.swift", "func f() {}\nlet x = f()\n")]);
        let edge = cg.edges.iter().find(|e| e.callee == "f").unwrap();
        assert!(edge.caller.is_none());
        assert!(edge.is_internal);
    }
}
