//! Depth-first traversal with per-node instrumentation.
//!
//! The traversal is **iterative**: an explicit frame stack replaces
//! recursion, so the depth of the graph is not limited by the size of the
//! program stack. The frame stack reproduces the recursive semantics
//! exactly, including the tie-break rule that among multiple white
//! neighbors the one earliest in the neighbor list is visited first.
//!
//! Every discovery appends a [`Snapshot`] of the whole graph to an
//! append-only log, bracketed by an initial and a final snapshot. The log
//! is a plain return value so the traversal stays independent of any
//! rendering concern.
//!
//! # Examples
//!
//! ```
//! use dfstrace::{graph::Graph, parse, visit};
//!
//! let input = parse::parse("AB,BC,AC").unwrap();
//! let mut graph = Graph::build(&input);
//!
//! let snapshots = visit::dfs(&mut graph);
//!
//! // One snapshot per visit, plus the initial and final states.
//! assert_eq!(snapshots.len(), graph.node_count() + 2);
//! assert_eq!(graph.node('A').unwrap().discovered(), Some(0));
//! assert_eq!(graph.node('A').unwrap().finished(), Some(5));
//! ```

use std::fmt;

use crate::graph::{Color, Graph, NodeId};

/// Width over which snapshot headers are centered when rendering.
const TABLE_WIDTH: usize = 90;

/// Header text attached to a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotLabel {
    /// The all-white graph before the traversal starts.
    Initial,
    /// A node just turned grey.
    Visiting(NodeId),
    /// The all-black graph after the traversal finished.
    Final,
}

impl fmt::Display for SnapshotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotLabel::Initial => f.write_str("(Initial state)"),
            SnapshotLabel::Visiting(id) => write!(f, "(Visiting {id})"),
            SnapshotLabel::Final => f.write_str("(Final state)"),
        }
    }
}

/// Traversal state of one node as captured in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeState {
    pub id: NodeId,
    pub color: Color,
    pub predecessor: Option<NodeId>,
    pub discovered: Option<usize>,
    pub finished: Option<usize>,
}

/// An immutable record of every node's traversal state at one instant.
///
/// Rows appear in the graph's fixed iteration order. The `Display`
/// implementation renders the snapshot as a tracking table with one column
/// per node and `-` standing in for values not yet set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    label: SnapshotLabel,
    rows: Vec<NodeState>,
}

impl Snapshot {
    fn capture(label: SnapshotLabel, graph: &Graph) -> Self {
        let rows = graph
            .nodes()
            .map(|node| NodeState {
                id: node.id(),
                color: node.color(),
                predecessor: node.predecessor(),
                discovered: node.discovered(),
                finished: node.finished(),
            })
            .collect();

        Self { label, rows }
    }

    pub fn label(&self) -> SnapshotLabel {
        self.label
    }

    pub fn rows(&self) -> &[NodeState] {
        &self.rows
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Width and alignment apply to `str`, not to the label's own
        // `Display`, which would ignore the padding.
        writeln!(f, "{:^width$}", self.label.to_string(), width = TABLE_WIDTH)?;

        write_row(f, "Node\t\t", self.rows.iter().map(|row| row.id.to_string()))?;
        write_row(f, "Color\t\t", self.rows.iter().map(|row| row.color.to_string()))?;
        write_row(
            f,
            "Predecessor\t",
            self.rows.iter().map(|row| placeholder(row.predecessor)),
        )?;
        write_row(
            f,
            "First Time\t",
            self.rows.iter().map(|row| placeholder(row.discovered)),
        )?;
        write_row(
            f,
            "Last Time\t",
            self.rows.iter().map(|row| placeholder(row.finished)),
        )
    }
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    cells: impl Iterator<Item = String>,
) -> fmt::Result {
    f.write_str(label)?;
    for cell in cells {
        write!(f, "\t{cell}\t")?;
    }
    writeln!(f)
}

fn placeholder<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_owned(),
    }
}

/// One suspended `visit` activation: the node being explored and the
/// position in its neighbor list where scanning resumes.
#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    next: usize,
}

/// Runs a depth-first search over the whole graph.
///
/// Nodes are taken as tree roots in the graph's fixed iteration order,
/// skipping those already discovered from an earlier root. The timestamp
/// counter starts at 0 and advances by one on every discovery and every
/// finish, so a complete run uses `2 × node_count` distinct timestamps.
///
/// The graph is mutated in place: colors, timestamps and predecessor links
/// are written into the nodes. The returned snapshot log contains the
/// initial state, one entry per visited node, and the final state, in
/// emission order. The traversal cannot fail on a well-formed graph.
pub fn dfs(graph: &mut Graph) -> Vec<Snapshot> {
    let mut snapshots = vec![Snapshot::capture(SnapshotLabel::Initial, graph)];
    let mut time = 0;

    let roots: Vec<NodeId> = graph.node_ids().collect();
    for root in roots {
        let white = graph.node(root).expect("node exists in graph").color() == Color::White;
        if white {
            visit(graph, root, &mut time, &mut snapshots);
        }
    }

    snapshots.push(Snapshot::capture(SnapshotLabel::Final, graph));
    snapshots
}

fn visit(graph: &mut Graph, root: NodeId, time: &mut usize, snapshots: &mut Vec<Snapshot>) {
    let mut stack = vec![open(graph, root, time, snapshots)];

    while let Some(&Frame { id, next }) = stack.last() {
        match next_white_neighbor(graph, id, next) {
            Some((resume, neighbor)) => {
                let top = stack.len() - 1;
                stack[top].next = resume;

                graph
                    .node_mut(neighbor)
                    .expect("neighbor registered during parsing")
                    .predecessor = Some(id);
                stack.push(open(graph, neighbor, time, snapshots));
            }
            None => {
                stack.pop();

                let node = graph.node_mut(id).expect("node exists in graph");
                node.color = Color::Black;
                node.finished = Some(*time);
                *time += 1;
            }
        }
    }
}

/// Opens a node: stamps its discovery time, turns it grey and records the
/// snapshot for this visit.
fn open(graph: &mut Graph, id: NodeId, time: &mut usize, snapshots: &mut Vec<Snapshot>) -> Frame {
    {
        let node = graph.node_mut(id).expect("node exists in graph");
        // The discovery time is stamped at most once, even on a re-entry.
        if node.discovered.is_none() {
            node.discovered = Some(*time);
        }
        node.color = Color::Grey;
    }
    *time += 1;

    snapshots.push(Snapshot::capture(SnapshotLabel::Visiting(id), graph));

    Frame { id, next: 0 }
}

/// Finds the first still-white neighbor of `id` at position `from` or
/// later, returning it together with the position to resume scanning at.
///
/// Colors are re-checked here rather than when the frame was pushed; a
/// neighbor that was white back then may have been discovered through a
/// deeper path in the meantime.
fn next_white_neighbor(graph: &Graph, id: NodeId, from: usize) -> Option<(usize, NodeId)> {
    let node = graph.node(id).expect("node exists in graph");

    node.neighbors()[from..]
        .iter()
        .enumerate()
        .find(|(_, &neighbor)| {
            graph
                .node(neighbor)
                .expect("neighbor registered during parsing")
                .color()
                == Color::White
        })
        .map(|(offset, &neighbor)| (from + offset + 1, neighbor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn traversed(input: &str) -> (Graph, Vec<Snapshot>) {
        let input = parse(input).unwrap();
        let mut graph = Graph::build(&input);
        let snapshots = dfs(&mut graph);
        (graph, snapshots)
    }

    fn times(graph: &Graph, id: NodeId) -> (usize, usize) {
        let node = graph.node(id).unwrap();
        (node.discovered().unwrap(), node.finished().unwrap())
    }

    #[test]
    fn triangle_timestamps() {
        let (graph, _) = traversed("AB,BC,AC");

        assert_eq!(times(&graph, 'A'), (0, 5));
        assert_eq!(times(&graph, 'B'), (1, 4));
        assert_eq!(times(&graph, 'C'), (2, 3));
    }

    #[test]
    fn triangle_predecessors() {
        let (graph, _) = traversed("AB,BC,AC");

        assert_eq!(graph.node('A').unwrap().predecessor(), None);
        assert_eq!(graph.node('B').unwrap().predecessor(), Some('A'));
        assert_eq!(graph.node('C').unwrap().predecessor(), Some('B'));
    }

    #[test]
    fn all_nodes_black_after_run() {
        let (graph, _) = traversed("AB,BC,AC,CD");

        for node in graph.nodes() {
            assert_eq!(node.color(), Color::Black);
        }
    }

    #[test]
    fn disconnected_components_get_disjoint_intervals() {
        let (graph, _) = traversed("AB,CD");

        assert_eq!(times(&graph, 'A'), (0, 3));
        assert_eq!(times(&graph, 'B'), (1, 2));
        assert_eq!(times(&graph, 'C'), (4, 7));
        assert_eq!(times(&graph, 'D'), (5, 6));

        assert_eq!(graph.node('C').unwrap().predecessor(), None);
        assert_eq!(graph.node('D').unwrap().predecessor(), Some('C'));
    }

    #[test]
    fn timestamps_are_distinct() {
        let (graph, _) = traversed("AB,BC,AC,CD,DE");

        let mut stamps: Vec<usize> = graph
            .nodes()
            .flat_map(|node| [node.discovered().unwrap(), node.finished().unwrap()])
            .collect();
        stamps.sort_unstable();
        stamps.dedup();

        assert_eq!(stamps.len(), 2 * graph.node_count());
    }

    #[test]
    fn snapshot_log_is_bracketed() {
        let (graph, snapshots) = traversed("AB,BC,AC");

        assert_eq!(snapshots.len(), graph.node_count() + 2);
        assert_eq!(snapshots.first().unwrap().label(), SnapshotLabel::Initial);
        assert_eq!(snapshots.last().unwrap().label(), SnapshotLabel::Final);
    }

    #[test]
    fn initial_snapshot_is_all_white() {
        let (_, snapshots) = traversed("AB,BC");

        for row in snapshots[0].rows() {
            assert_eq!(row.color, Color::White);
            assert_eq!(row.predecessor, None);
            assert_eq!(row.discovered, None);
            assert_eq!(row.finished, None);
        }
    }

    #[test]
    fn final_snapshot_is_all_black() {
        let (_, snapshots) = traversed("AB,BC");

        for row in snapshots.last().unwrap().rows() {
            assert_eq!(row.color, Color::Black);
            assert!(row.discovered.is_some());
            assert!(row.finished.is_some());
        }
    }

    #[test]
    fn visiting_snapshots_follow_discovery_order() {
        let (graph, snapshots) = traversed("AB,BC,AC,DE");

        let visited: Vec<NodeId> = snapshots
            .iter()
            .filter_map(|snapshot| match snapshot.label() {
                SnapshotLabel::Visiting(id) => Some(id),
                _ => None,
            })
            .collect();

        let mut by_discovery: Vec<(usize, NodeId)> = graph
            .nodes()
            .map(|node| (node.discovered().unwrap(), node.id()))
            .collect();
        by_discovery.sort_unstable();

        let expected: Vec<NodeId> = by_discovery.into_iter().map(|(_, id)| id).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn visiting_snapshot_shows_predecessor_already_set() {
        let (_, snapshots) = traversed("AB");

        // Second visit snapshot is for B; its predecessor must be visible.
        let snapshot = &snapshots[2];
        assert_eq!(snapshot.label(), SnapshotLabel::Visiting('B'));

        let row = snapshot.rows().iter().find(|row| row.id == 'B').unwrap();
        assert_eq!(row.color, Color::Grey);
        assert_eq!(row.predecessor, Some('A'));
        assert_eq!(row.discovered, Some(1));
        assert_eq!(row.finished, None);
    }

    #[test]
    fn tie_break_follows_neighbor_list_order() {
        // B's neighbor list is [A, C, D]; after A opens B, the scan picks C
        // before D, and D is then reached through C.
        let (graph, _) = traversed("AB,BC,BD,CD");

        assert_eq!(graph.node('C').unwrap().predecessor(), Some('B'));
        assert_eq!(graph.node('D').unwrap().predecessor(), Some('C'));
    }

    #[test]
    fn tracking_table_rendering() {
        let (_, snapshots) = traversed("AB");

        let rendered = snapshots[0].to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], format!("{:^90}", "(Initial state)"));
        assert_eq!(lines[1], "Node\t\t\tA\t\tB\t");
        assert_eq!(lines[2], "Color\t\t\twhite\t\twhite\t");
        assert_eq!(lines[3], "Predecessor\t\t-\t\t-\t");
        assert_eq!(lines[4], "First Time\t\t-\t\t-\t");
        assert_eq!(lines[5], "Last Time\t\t-\t\t-\t");
    }

    #[test]
    fn rerunning_on_fresh_graph_is_deterministic() {
        let (_, first) = traversed("AB,BC,AC,CD");
        let (_, second) = traversed("AB,BC,AC,CD");

        assert_eq!(first, second);
    }
}
