//! File-dependency graph
//!
//! One node per file, one edge per `(file, import)` pair. An import
//! resolves to an internal file when its module name matches another
//! file's base name; unresolved imports stay in the edge list but are
//! leaves for every traversal.

use crate::ir::Ir;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub path: String,
    pub module_name: String,
    pub is_entry_point: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEdge {
    /// Importing file path
    pub from: String,
    /// Imported module name
    pub to: String,
    /// Path of the internal file the module resolved to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileGraph {
    pub nodes: Vec<FileNode>,
    pub edges: Vec<FileEdge>,
    /// Resolved-edge structure for traversals; node weight indexes `nodes`
    #[serde(skip)]
    graph: DiGraph<usize, ()>,
    #[serde(skip)]
    path_to_node: FxHashMap<String, NodeIndex>,
    /// Module name → file path. Files arrive sorted by path, so the
    /// lexicographically last path wins a base-name collision.
    #[serde(skip)]
    module_to_file: FxHashMap<String, String>,
}

impl FileGraph {
    pub fn build(ir: &Ir) -> Self {
        let mut fg = FileGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
            graph: DiGraph::new(),
            path_to_node: FxHashMap::default(),
            module_to_file: FxHashMap::default(),
        };

        for file in &ir.files {
            let node = fg.graph.add_node(fg.nodes.len());
            fg.path_to_node.insert(file.path.clone(), node);
            fg.module_to_file
                .insert(file.module_name.clone(), file.path.clone());
            fg.nodes.push(FileNode {
                path: file.path.clone(),
                module_name: file.module_name.clone(),
                is_entry_point: file.is_entry_point,
            });
        }

        for file in &ir.files {
            for import in &file.imports {
                let resolved_path = fg.module_to_file.get(&import.module_name).cloned();
                if let Some(resolved) = &resolved_path {
                    // A file whose name matches an external framework can
                    // appear to import itself; that is not a dependency.
                    if resolved != &file.path {
                        let from = fg.path_to_node[&file.path];
                        let to = fg.path_to_node[resolved];
                        fg.graph.add_edge(from, to, ());
                    }
                }
                fg.edges.push(FileEdge {
                    from: file.path.clone(),
                    to: import.module_name.clone(),
                    resolved_path,
                });
            }
        }

        fg
    }

    /// Whether a module name names one of the analyzed files.
    pub fn is_local_module(&self, module_name: &str) -> bool {
        self.module_to_file.contains_key(module_name)
    }

    pub fn node(&self, path: &str) -> Option<&FileNode> {
        self.path_to_node
            .get(path)
            .map(|&idx| &self.nodes[self.graph[idx]])
    }

    /// Edges whose imported module resolves to this file.
    pub fn incoming_edges(&self, path: &str) -> Vec<&FileEdge> {
        let Some(node) = self.node(path) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .filter(|e| e.to == node.module_name)
            .collect()
    }

    /// Edges leaving this file, resolved or not.
    pub fn outgoing_edges(&self, path: &str) -> Vec<&FileEdge> {
        self.edges.iter().filter(|e| e.from == path).collect()
    }

    pub fn in_degree(&self, path: &str) -> usize {
        self.incoming_edges(path).len()
    }

    pub fn out_degree(&self, path: &str) -> usize {
        self.outgoing_edges(path).len()
    }

    /// DFS cycle detection over resolved edges.
    ///
    /// Each cycle is the slice of the DFS path from the first occurrence of
    /// the revisited node, with that node appended once more to close the
    /// cycle, so every result begins and ends with the same path.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();

        for start in self.graph.node_indices() {
            if visited.contains(&start) {
                continue;
            }
            let mut stack = Vec::new();
            let mut on_stack: FxHashSet<NodeIndex> = FxHashSet::default();
            self.dfs_cycles(start, &mut visited, &mut stack, &mut on_stack, &mut cycles);
        }

        cycles
    }

    fn dfs_cycles(
        &self,
        node: NodeIndex,
        visited: &mut FxHashSet<NodeIndex>,
        stack: &mut Vec<NodeIndex>,
        on_stack: &mut FxHashSet<NodeIndex>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        visited.insert(node);
        on_stack.insert(node);
        stack.push(node);

        // petgraph iterates neighbors newest-edge-first; restore input order
        let mut targets: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        targets.reverse();

        for next in targets {
            if on_stack.contains(&next) {
                let pos = stack
                    .iter()
                    .position(|&n| n == next)
                    .expect("node on recursion stack");
                let mut cycle: Vec<String> = stack[pos..]
                    .iter()
                    .map(|&n| self.nodes[self.graph[n]].path.clone())
                    .collect();
                cycle.push(self.nodes[self.graph[next]].path.clone());
                cycles.push(cycle);
            } else if !visited.contains(&next) {
                self.dfs_cycles(next, visited, stack, on_stack, cycles);
            }
        }

        stack.pop();
        on_stack.remove(&node);
    }

    /// Longest resolved import chain below each file.
    ///
    /// Unresolved imports are leaves; a back-edge to a file on the current
    /// recursion set contributes depth 0.
    pub fn depths(&self) -> FxHashMap<String, usize> {
        let mut memo: FxHashMap<NodeIndex, usize> = FxHashMap::default();
        let mut visiting: FxHashSet<NodeIndex> = FxHashSet::default();
        for node in self.graph.node_indices() {
            self.depth_rec(node, &mut memo, &mut visiting);
        }
        memo.into_iter()
            .map(|(idx, d)| (self.nodes[self.graph[idx]].path.clone(), d))
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
        for next in self.graph.neighbors(node) {
            depth = depth.max(1 + self.depth_rec(next, memo, visiting));
        }
        visiting.remove(&node);
        memo.insert(node, depth);
        depth
    }

    /// Number of files that transitively depend on `path` (blast radius),
    /// computed by BFS over the reverse edge set.
    pub fn transitive_dependents(&self, path: &str) -> usize {
        let Some(&start) = self.path_to_node.get(path) else {
            return 0;
        };
        let mut seen: FxHashSet<NodeIndex> = FxHashSet::default();
        seen.insert(start);
        let mut queue = std::collections::VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for prev in self.graph.neighbors_directed(node, Direction::Incoming) {
                if seen.insert(prev) {
                    queue.push_back(prev);
                }
            }
        }
        seen.len() - 1
    }
}
