//! The graph model: nodes keyed by single-character identifiers connected
//! by an undirected neighbor relation.
//!
//! A [`Graph`] is built once from a validated [edge list](crate::parse) and
//! fully replaced on the next submission. There is no incremental update
//! path. Iteration order over the nodes is fixed at construction time and
//! determines where whole-graph traversals start.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::parse::EdgeList;

/// Identifier of a node, a single case-sensitive character.
pub type NodeId = char;

/// An undirected edge between two distinct nodes.
///
/// The endpoints are stored in canonical form, sorted ascending, so that
/// the pair `{B, A}` and the pair `{A, B}` compare equal and render as
/// `"AB"`. The derived `Ord` coincides with the lexicographic order of the
/// rendered two-character string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(NodeId, NodeId);

impl Edge {
    /// Creates the canonical edge for an unordered pair of endpoints.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        debug_assert!(a != b, "self-loops are rejected during parsing");

        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The endpoints in canonical (ascending) order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }

    /// Returns the other endpoint if `id` is incident to this edge.
    pub fn partner(&self, id: NodeId) -> Option<NodeId> {
        if self.0 == id {
            Some(self.1)
        } else if self.1 == id {
            Some(self.0)
        } else {
            None
        }
    }

    /// Returns `true` if this edge connects `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.0, self.1) == (a, b) || (self.0, self.1) == (b, a)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// Traversal state of a node.
///
/// Within one run the transitions are monotonic: `White` → `Grey` on
/// discovery, `Grey` → `Black` on finish, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Not yet visited.
    White,
    /// On the current traversal path.
    Grey,
    /// Fully explored, all reachable neighbors finished.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Grey => "grey",
            Color::Black => "black",
        };
        f.write_str(name)
    }
}

/// A node record together with its mutable traversal state.
///
/// The neighbor list is built by appending each edge's endpoints to both
/// incident nodes in edge-list order. That order, not alphabetical order,
/// is what governs tie-breaks during traversal.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    neighbors: Vec<NodeId>,
    pub(crate) color: Color,
    pub(crate) discovered: Option<usize>,
    pub(crate) finished: Option<usize>,
    pub(crate) predecessor: Option<NodeId>,
}

impl Node {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            neighbors: Vec::new(),
            color: Color::White,
            discovered: None,
            finished: None,
            predecessor: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Timestamp recorded when the node turned grey, if visited.
    pub fn discovered(&self) -> Option<usize> {
        self.discovered
    }

    /// Timestamp recorded when the node turned black, if finished.
    pub fn finished(&self) -> Option<usize> {
        self.finished
    }

    /// The node from which this node was first discovered.
    ///
    /// This is a lookup key into the owning [`Graph`], not an owning
    /// reference, so mutually adjacent nodes cannot form ownership cycles.
    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }
}

/// A graph owning one [`Node`] per identifier.
///
/// # Examples
///
/// ```
/// use dfstrace::{graph::Graph, parse};
///
/// let input = parse::parse("AB,BC,AC,CD").unwrap();
/// let graph = Graph::build(&input);
///
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.node('C').unwrap().neighbors(), ['A', 'B', 'D']);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    order: Vec<NodeId>,
    nodes: FxHashMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds the graph from a validated edge list.
    ///
    /// Nodes are inserted in the ascending identifier order established by
    /// the parser, which fixes the iteration order for the lifetime of the
    /// graph. Every edge contributes one neighbor entry to each endpoint.
    pub fn build(input: &EdgeList) -> Self {
        let order = input.nodes().to_vec();
        let mut nodes: FxHashMap<NodeId, Node> = order
            .iter()
            .map(|&id| (id, Node::new(id)))
            .collect();

        for edge in input.edges() {
            let (a, b) = edge.endpoints();
            nodes
                .get_mut(&a)
                .expect("endpoint registered during parsing")
                .neighbors
                .push(b);
            nodes
                .get_mut(&b)
                .expect("endpoint registered during parsing")
                .neighbors
                .push(a);
        }

        Self {
            order,
            nodes,
            edges: input.edges().to_vec(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Node identifiers in the graph's fixed iteration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Nodes in the graph's fixed iteration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().map(move |id| &self.nodes[id])
    }

    /// The validated canonical edge set, sorted ascending.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
