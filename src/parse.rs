//! Parsing and validation of the textual edge-list input.
//!
//! The input is a comma-separated list of two-character tokens, each
//! naming the endpoints of one undirected edge (e.g., `"AB,BC,AC"`).
//! Whitespace around tokens is ignored. Validation is short-circuiting:
//! the first offending token rejects the whole submission and no partial
//! node or edge data is exposed.
//!
//! # Examples
//!
//! ```
//! use dfstrace::parse::{parse, ParseError};
//!
//! let input = parse("AB,BC,AC").unwrap();
//!
//! assert_eq!(input.nodes(), ['A', 'B', 'C']);
//! assert_eq!(input.edges()[0].to_string(), "AB");
//!
//! assert_eq!(parse("AB,BA"), Err(ParseError::DuplicateEdge));
//! ```

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::graph::{Edge, NodeId};

/// Error returned when the edge-list input is rejected.
///
/// Each kind carries a fixed human-readable message. Validation stops at
/// the first failing token, so a submission produces at most one error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A token does not consist of exactly two characters.
    #[error("each edge must connect exactly two nodes")]
    MalformedEdge,
    /// Both characters of a token are equal.
    #[error("a node cannot connect to itself")]
    SelfLoop,
    /// A token repeats an already accepted edge, possibly with its
    /// endpoints swapped.
    #[error("there cannot be two edges joining the same nodes")]
    DuplicateEdge,
}

/// Validated and canonicalized form of one submission.
///
/// Immutable once produced. Node identifiers and canonical edges are both
/// sorted ascending and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl EdgeList {
    /// Participating node identifiers, one entry per distinct node.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The canonical edge set.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Parses a raw submission into a validated [`EdgeList`].
///
/// Tokens are processed in input order and every accepted edge registers
/// both of its endpoints as nodes. On success the node sequence and the
/// canonical edge sequence are sorted ascending.
pub fn parse(input: &str) -> Result<EdgeList, ParseError> {
    let mut nodes = Vec::new();
    let mut seen = FxHashSet::default();
    let mut edges: Vec<Edge> = Vec::new();

    for token in input.split(',') {
        let token = token.trim();

        let mut chars = token.chars();
        let (a, b) = match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => return Err(ParseError::MalformedEdge),
        };

        if a == b {
            return Err(ParseError::SelfLoop);
        }

        // Canonicalizing before the duplicate check catches reversed
        // duplicates such as "BA" after "AB".
        let edge = Edge::new(a, b);
        if edges.contains(&edge) {
            return Err(ParseError::DuplicateEdge);
        }

        for id in [a, b] {
            if seen.insert(id) {
                nodes.push(id);
            }
        }

        edges.push(edge);
    }

    nodes.sort_unstable();
    edges.sort_unstable();

    Ok(EdgeList { nodes, edges })
}
