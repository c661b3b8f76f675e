//! Inheritance graph
//!
//! One node per type declaration, one edge per inheritance-clause entry.
//! Entries are matched to internal types by exact name; everything else
//! (external protocols, stdlib types) stays in the edge list as external.

use crate::ir::{Ir, TypeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeKind,
    pub file_path: String,
    pub line: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEdge {
    /// Subtype name
    pub from: String,
    /// Inherited name, verbatim
    pub to: String,
    pub is_internal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritanceGraph {
    pub nodes: Vec<TypeNode>,
    pub edges: Vec<TypeEdge>,
    /// Internal subtype→supertype structure; node weight indexes `nodes`
    #[serde(skip)]
    graph: DiGraph<usize, ()>,
    #[serde(skip)]
    node_indices: Vec<NodeIndex>,
    /// First declaration wins when two types share a name
    #[serde(skip)]
    name_to_node: FxHashMap<String, NodeIndex>,
}

impl InheritanceGraph {
    pub fn build(ir: &Ir) -> Self {
        let mut ig = InheritanceGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
            graph: DiGraph::new(),
            node_indices: Vec::new(),
            name_to_node: FxHashMap::default(),
        };

        let declared: FxHashSet<&str> = ir.type_decls.iter().map(|t| t.name.as_str()).collect();

        for t in &ir.type_decls {
            let node = ig.graph.add_node(ig.nodes.len());
            ig.node_indices.push(node);
            ig.name_to_node.entry(t.name.clone()).or_insert(node);
            ig.nodes.push(TypeNode {
                name: t.name.clone(),
                kind: t.kind,
                file_path: t.file_path.clone(),
                line: t.line,
            });
        }

        for (i, t) in ir.type_decls.iter().enumerate() {
            for inherited in &t.inherited_types {
                let is_internal = declared.contains(inherited.as_str());
                if is_internal {
                    if let Some(&parent) = ig.name_to_node.get(inherited) {
                        ig.graph.add_edge(ig.node_indices[i], parent, ());
                    }
                }
                ig.edges.push(TypeEdge {
                    from: t.name.clone(),
                    to: inherited.clone(),
                    is_internal,
                });
            }
        }

        ig
    }

    /// Names of types whose inheritance clause lists `type_name`.
    pub fn subtypes(&self, type_name: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.to == type_name)
            .map(|e| e.from.as_str())
            .collect()
    }

    /// Raw inheritance-clause targets of `type_name`.
    #[allow(dead_code)] // Public API helper
    pub fn supertypes(&self, type_name: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.from == type_name)
            .map(|e| e.to.as_str())
            .collect()
    }

    /// Inheritance depth for every node, in node order.
    ///
    /// Depth is `1 + max(depth(parent))` over internal parents; no internal
    /// parents means depth 0. A back-edge to a type on the current
    /// recursion set contributes depth 0, which terminates the pathological
    /// inheritance cycle.
    pub fn depths(&self) -> Vec<usize> {
        let mut memo: FxHashMap<NodeIndex, usize> = FxHashMap::default();
        let mut visiting: FxHashSet<NodeIndex> = FxHashSet::default();
        self.node_indices
            .iter()
            .map(|&node| self.depth_rec(node, &mut memo, &mut visiting))
            .collect()
    }

    fn depth_rec(
        &self,
        node: NodeIndex,
        memo: &mut FxHashMap<NodeIndex, usize>,
        visiting: &mut FxHashSet<NodeIndex>,
    ) -> usize {
        if let Some(&d) = memo.get(&node) {
            return d;
        }
        if !visiting.insert(node) {
            return 0;
        }
        let mut depth = 0;
        for parent in self.graph.neighbors(node) {
            depth = depth.max(1 + self.depth_rec(parent, memo, visiting));
        }
        visiting.remove(&node);
        memo.insert(node, depth);
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir;
    use crate::parsers::swift;

    fn graph_from(files: &[(&str, &str)]) -> InheritanceGraph {
        let parsed: Vec<_> = files
            .iter()
            .map(|(path, src)| swift::parse_source(src, path))
            .collect();
        InheritanceGraph::build(&ir::build(&parsed))
    }

    #[test]
    fn test_internal_and_external_edges() {
        let ig = graph_from(&[(
            "A.swift",
            "protocol P {}\nclass C: P, Codable {}\n",
        )]);
        assert_eq!(ig.nodes.len(), 2);
        assert_eq!(ig.edges.len(), 2);
        let internal = ig.edges.iter().find(|e| e.to == "P").unwrap();
        assert!(internal.is_internal);
        let external = ig.edges.iter().find(|e| e.to == "Codable").unwrap();
        assert!(!external.is_internal);
    }

    #[test]
    fn test_subtypes_and_supertypes() {
        let ig = graph_from(&[(
            "A.swift",
            "protocol P {}\nstruct S1: P {}\nstruct S2: P {}\n",
        )]);
        let mut subs = ig.subtypes("P");
        subs.sort();
        assert_eq!(subs, vec!["S1", "S2"]);
        assert_eq!(ig.supertypes("S1"), vec!["P"]);
        assert!(ig.supertypes("P").is_empty());
    }

    #[test]
    fn test_depth_chain() {
        let ig = graph_from(&[(
            "A.swift",
            "protocol P {}\nclass C1: P {}\nclass C2: C1 {}\nclass C3: C2 {}\nclass C4: C3 {}\n",
        )]);
        let depths = ig.depths();
        let by_name: FxHashMap<&str, usize> = ig
            .nodes
            .iter()
            .map(|n| n.name.as_str())
            .zip(depths)
            .collect();
        assert_eq!(by_name["P"], 0);
        assert_eq!(by_name["C1"], 1);
        assert_eq!(by_name["C2"], 2);
        assert_eq!(by_name["C3"], 3);
        assert_eq!(by_name["C4"], 4);
    }

    #[test]
    fn test_external_parent_is_depth_zero() {
        let ig = graph_from(&[("A.swift", "class C: UIViewController {}\n")]);
        assert_eq!(ig.depths(), vec![0]);
    }

    #[test]
    fn test_depth_terminates_on_cycle() {
        let ig = graph_from(&[("A.swift", "class A: B {}\nclass B: A {}\n")]);
        let depths = ig.depths();
        assert_eq!(depths.len(), 2);
    }
}
