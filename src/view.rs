//! Presentation-ready views derived from a finished graph.
//!
//! All builders in this module are pure: they read state finalized by
//! graph construction and traversal and produce immutable values for the
//! presentation layer to consume. The adjacency matrix and the adjacency
//! list are indexed by the sorted node sequence, not by traversal results.

use fixedbitset::FixedBitSet;

use crate::graph::{Graph, NodeId};

/// Symmetric 0/1 adjacency matrix over the graph's sorted node sequence.
///
/// The diagonal is all zeros since self-loops are rejected during parsing.
///
/// # Examples
///
/// ```
/// use dfstrace::{graph::Graph, parse, view::AdjacencyMatrix};
///
/// let input = parse::parse("AB,BC,AC").unwrap();
/// let graph = Graph::build(&input);
/// let matrix = AdjacencyMatrix::build(&graph);
///
/// assert_eq!(matrix.labels(), ['A', 'B', 'C']);
/// assert_eq!(
///     matrix.to_rows(),
///     vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    order: Vec<NodeId>,
    bits: FixedBitSet,
}

impl AdjacencyMatrix {
    /// Builds the matrix from the graph's edge set.
    ///
    /// Each edge sets the cells for both orientations of its endpoints,
    /// which makes the matrix symmetric by construction.
    pub fn build(graph: &Graph) -> Self {
        let order: Vec<NodeId> = graph.node_ids().collect();
        let n = order.len();
        let mut bits = FixedBitSet::with_capacity(n * n);

        for edge in graph.edges() {
            let (a, b) = edge.endpoints();
            let i = order
                .binary_search(&a)
                .expect("endpoint registered during parsing");
            let j = order
                .binary_search(&b)
                .expect("endpoint registered during parsing");

            bits.insert(i * n + j);
            bits.insert(j * n + i);
        }

        Self { order, bits }
    }

    /// Number of rows (and columns) of the matrix.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node identifiers labeling the rows and columns, sorted ascending.
    pub fn labels(&self) -> &[NodeId] {
        &self.order
    }

    /// Cell value at `(row, col)`: 1 if the corresponding nodes are
    /// adjacent, 0 otherwise. Both indices must be less than [`len`](Self::len).
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.bits.contains(row * self.order.len() + col) as u8
    }

    /// The matrix as rows of 0/1 cells.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let n = self.len();
        (0..n)
            .map(|row| (0..n).map(|col| self.get(row, col)).collect())
            .collect()
    }
}

/// Renders the adjacency-list view, one line per node in sorted order.
///
/// Each line starts with the node identifier, lists its edge partners in
/// validated edge-list order and is terminated by `-> /`:
///
/// ```
/// use dfstrace::{graph::Graph, parse, view};
///
/// let input = parse::parse("AB,BC,AC,CD").unwrap();
/// let graph = Graph::build(&input);
///
/// assert_eq!(view::adjacency_list(&graph)[2], "C -> A -> B -> D -> /");
/// ```
pub fn adjacency_list(graph: &Graph) -> Vec<String> {
    graph
        .node_ids()
        .map(|id| {
            let mut line = String::from(id);
            for edge in graph.edges() {
                if let Some(partner) = edge.partner(id) {
                    line.push_str(" -> ");
                    line.push(partner);
                }
            }
            line.push_str(" -> /");
            line
        })
        .collect()
}

/// Node identifiers joined with `,` in ascending discovery-time order.
///
/// This exposes the traversal's discovery sequence independent of any
/// snapshot formatting. Nodes never discovered (only possible before the
/// traversal ran) are omitted.
pub fn visit_order(graph: &Graph) -> String {
    let mut discovered: Vec<(usize, NodeId)> = graph
        .nodes()
        .filter_map(|node| node.discovered().map(|time| (time, node.id())))
        .collect();
    discovered.sort_unstable();

    let ids: Vec<String> = discovered
        .into_iter()
        .map(|(_, id)| id.to_string())
        .collect();
    ids.join(",")
}
