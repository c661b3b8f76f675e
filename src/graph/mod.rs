//! Dependency graphs derived from the IR
//!
//! Three independent graphs, all read-only after construction:
//! file-dependency (imports), inheritance (supertype clauses), and calls.
//! Storage is flat: node records in vectors, petgraph `DiGraph`s over node
//! indices for traversal, `FxHashMap` side tables for name lookup.

mod call_graph;
mod file_graph;
mod inheritance;

pub use call_graph::{CallEdge, CallGraph, FunctionNode};
pub use file_graph::{FileEdge, FileGraph, FileNode};
pub use inheritance::{InheritanceGraph, TypeEdge, TypeNode};

use crate::ir::Ir;

/// Build all three graphs from one IR.
pub fn build_graphs(ir: &Ir) -> (FileGraph, InheritanceGraph, CallGraph) {
    (
        FileGraph::build(ir),
        InheritanceGraph::build(ir),
        CallGraph::build(ir),
    )
}
