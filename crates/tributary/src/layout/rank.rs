//! Cycle breaking and longest-path layer assignment.

use log::trace;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::graph::Graph;

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Grey,
    Black,
}

/// Flags every back-link found by a depth-first search as feedback.
///
/// Roots and out-links are visited in declaration order, so the flagged
/// set is deterministic. Flags from a previous run are cleared first;
/// reversing the flagged links (done virtually during ranking) leaves the
/// graph acyclic.
pub(crate) fn break_cycles(graph: &mut Graph) {
    for idx in graph.link_indices().collect::<Vec<_>>() {
        graph.set_feedback(idx, false);
    }

    let successors = successor_lists(graph);
    let mut marks = vec![Mark::White; graph.node_count()];
    let mut feedback = Vec::new();

    for root in graph.node_indices().collect::<Vec<_>>() {
        if marks[root.index()] == Mark::White {
            visit(root, &successors, &mut marks, &mut feedback);
        }
    }

    trace!(feedback_links = feedback.len(); "Cycle breaking finished");

    for idx in feedback {
        graph.set_feedback(idx, true);
    }
}

fn visit(
    node: NodeIndex,
    successors: &[Vec<(EdgeIndex, NodeIndex)>],
    marks: &mut [Mark],
    feedback: &mut Vec<EdgeIndex>,
) {
    marks[node.index()] = Mark::Grey;

    for &(link, next) in &successors[node.index()] {
        match marks[next.index()] {
            Mark::Grey => feedback.push(link),
            Mark::White => visit(next, successors, marks, feedback),
            Mark::Black => {}
        }
    }

    marks[node.index()] = Mark::Black;
}

/// Assigns each node the length of the longest forward path reaching it.
///
/// Feedback links are treated as reversed; self-links impose no
/// constraint. The result is indexed by `NodeIndex::index`.
pub(crate) fn assign_layers(graph: &Graph) -> Vec<usize> {
    // Effective predecessors on the acyclic graph: forward links as-is,
    // feedback links reversed.
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); graph.node_count()];
    for idx in graph.link_indices() {
        let (source, target) = graph.link_endpoints(idx);
        if source == target {
            continue;
        }
        if graph.link(idx).feedback() {
            predecessors[source.index()].push(target);
        } else {
            predecessors[target.index()].push(source);
        }
    }

    let mut layers: Vec<Option<usize>> = vec![None; graph.node_count()];
    for node in graph.node_indices() {
        longest_path(node, &predecessors, &mut layers);
    }

    layers.into_iter().map(|layer| layer.unwrap_or(0)).collect()
}

fn longest_path(
    node: NodeIndex,
    predecessors: &[Vec<NodeIndex>],
    layers: &mut Vec<Option<usize>>,
) -> usize {
    if let Some(layer) = layers[node.index()] {
        return layer;
    }

    let layer = predecessors[node.index()]
        .iter()
        .map(|&pred| longest_path(pred, predecessors, layers) + 1)
        .max()
        .unwrap_or(0);

    layers[node.index()] = Some(layer);
    layer
}

/// Out-links per node in declaration order.
fn successor_lists(graph: &Graph) -> Vec<Vec<(EdgeIndex, NodeIndex)>> {
    let mut successors: Vec<Vec<(EdgeIndex, NodeIndex)>> = vec![Vec::new(); graph.node_count()];
    for idx in graph.link_indices() {
        let (source, target) = graph.link_endpoints(idx);
        successors[source.index()].push((idx, target));
    }
    successors
}
