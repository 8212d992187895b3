//! Depth-first search over textual edge lists, with per-node traversal
//! instrumentation and presentation-ready views.
//!
//! A submission like `"AB,BC,AC"` is [parsed](parse) into a validated,
//! canonicalized edge list, turned into a [graph](graph::Graph) and
//! [traversed](visit::dfs) depth-first. The traversal stamps discovery and
//! finish times, records predecessor links and appends a
//! [snapshot](visit::Snapshot) of the whole graph on every visit. From the
//! finished graph, the [view] builders derive an adjacency matrix, an
//! adjacency-list text rendering and the visit order.
//!
//! The whole pipeline is synchronous and deterministic: given the same
//! input it produces the same timestamps, snapshots and views. Each
//! submission builds a fresh graph; there is no incremental update path.
//!
//! Directed graphs, weighted edges, multi-character node identifiers and
//! multi-edges are out of scope.
//!
//! # Examples
//!
//! ```
//! use dfstrace::analyze;
//!
//! let analysis = analyze("AB,BC,AC").unwrap();
//!
//! assert_eq!(analysis.nodes, ['A', 'B', 'C']);
//! assert_eq!(analysis.visit_order, "A,B,C");
//! assert_eq!(
//!     analysis.matrix.to_rows(),
//!     vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]],
//! );
//!
//! // Initial state, one visit per node, final state.
//! assert_eq!(analysis.snapshots.len(), 5);
//! ```
//!
//! Invalid submissions are rejected as a whole, with a fixed message per
//! error kind:
//!
//! ```
//! use dfstrace::{analyze, ParseError};
//!
//! let error = analyze("AB,BA").unwrap_err();
//!
//! assert_eq!(error, ParseError::DuplicateEdge);
//! assert_eq!(error.to_string(), "there cannot be two edges joining the same nodes");
//! ```

pub mod graph;
pub mod parse;
pub mod view;
pub mod visit;

pub use crate::{
    graph::{Color, Edge, Graph, Node, NodeId},
    parse::{EdgeList, ParseError},
    view::AdjacencyMatrix,
    visit::{NodeState, Snapshot, SnapshotLabel},
};

/// Complete result of one submission.
///
/// This is everything the presentation layer consumes; a new submission
/// replaces the previous `Analysis` wholesale.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Participating node identifiers, sorted ascending.
    pub nodes: Vec<NodeId>,
    /// The validated canonical edge set, sorted ascending.
    pub edges: Vec<Edge>,
    /// Symmetric 0/1 adjacency matrix over the sorted nodes.
    pub matrix: AdjacencyMatrix,
    /// Adjacency-list text rendering, one line per node in sorted order.
    pub adjacency_list: Vec<String>,
    /// The traversal's snapshot log, in emission order.
    pub snapshots: Vec<Snapshot>,
    /// Node identifiers joined in ascending discovery-time order.
    pub visit_order: String,
}

/// Parses the input, runs the depth-first traversal and derives all views.
pub fn analyze(input: &str) -> Result<Analysis, ParseError> {
    let edge_list = parse::parse(input)?;

    let mut graph = Graph::build(&edge_list);
    let snapshots = visit::dfs(&mut graph);

    Ok(Analysis {
        matrix: AdjacencyMatrix::build(&graph),
        adjacency_list: view::adjacency_list(&graph),
        visit_order: view::visit_order(&graph),
        nodes: edge_list.nodes().to_vec(),
        edges: edge_list.edges().to_vec(),
        snapshots,
    })
}
