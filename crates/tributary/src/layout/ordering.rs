//! Median-heuristic crossing reduction.
//!
//! Orders unpinned nodes within each layer by alternating downward and
//! upward sweeps, keying each node on the median position of its
//! neighbors in the fixed adjacent layer. Sweeps are bounded; the best
//! ordering observed (fewest crossings) is kept. Only links between
//! adjacent layers participate; long links are not subdivided with
//! virtual nodes.

use log::trace;
use petgraph::graph::NodeIndex;

use crate::graph::Graph;

/// Result of the crossing-reduction phase.
pub(crate) struct Orderings {
    /// Unpinned node order per layer.
    pub orderings: Vec<Vec<NodeIndex>>,
    /// Adjacent-layer crossings in the kept ordering.
    pub crossings: usize,
    /// Sweeps actually run.
    pub sweeps: usize,
}

pub(crate) fn minimize_crossings(
    graph: &Graph,
    layers: &[usize],
    max_sweeps: usize,
) -> Orderings {
    let layer_count = graph
        .node_indices()
        .map(|idx| layers[idx.index()] + 1)
        .max()
        .unwrap_or(0);

    // Initial order is declaration order, which also serves as the
    // stable tie-break throughout.
    let mut orderings: Vec<Vec<NodeIndex>> = vec![Vec::new(); layer_count];
    for (idx, node) in graph.nodes_with_indices() {
        if !node.pinned() {
            orderings[layers[idx.index()]].push(idx);
        }
    }

    let neighbors = neighbor_lists(graph);
    let mut positions = vec![0usize; graph.node_count()];
    refresh_positions(&orderings, &mut positions);

    let mut best = orderings.clone();
    let mut best_crossings = count_crossings(graph, layers, &positions);
    let mut sweeps = 0;
    let mut stale = 0;

    while sweeps < max_sweeps && best_crossings > 0 {
        let downward = sweeps % 2 == 0;
        sweep(&mut orderings, &neighbors, &mut positions, layers, downward);
        sweeps += 1;

        let crossings = count_crossings(graph, layers, &positions);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = orderings.clone();
            stale = 0;
        } else {
            stale += 1;
            // A full down+up cycle without improvement will not recover.
            if stale >= 2 {
                break;
            }
        }
    }

    trace!(crossings = best_crossings, sweeps = sweeps; "Crossing reduction finished");

    Orderings {
        orderings: best,
        crossings: best_crossings,
        sweeps,
    }
}

fn sweep(
    orderings: &mut [Vec<NodeIndex>],
    neighbors: &[Vec<NodeIndex>],
    positions: &mut [usize],
    layers: &[usize],
    downward: bool,
) {
    let layer_count = orderings.len();
    let indices: Vec<usize> = if downward {
        (1..layer_count).collect()
    } else {
        (0..layer_count.saturating_sub(1)).rev().collect()
    };

    for layer_idx in indices {
        let fixed_layer = if downward { layer_idx - 1 } else { layer_idx + 1 };

        let mut keyed: Vec<(f64, NodeIndex)> = orderings[layer_idx]
            .iter()
            .enumerate()
            .map(|(current, &node)| {
                let key = median_position(node, fixed_layer, neighbors, positions, layers)
                    .unwrap_or(current as f64);
                (key, node)
            })
            .collect();

        // Stable sort keeps the prior order for equal medians.
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("medians are finite"));

        orderings[layer_idx] = keyed.into_iter().map(|(_, node)| node).collect();
        for (pos, &node) in orderings[layer_idx].iter().enumerate() {
            positions[node.index()] = pos;
        }
    }
}

/// Median position of the node's neighbors in the fixed layer, or `None`
/// when it has none there.
fn median_position(
    node: NodeIndex,
    fixed_layer: usize,
    neighbors: &[Vec<NodeIndex>],
    positions: &[usize],
    layers: &[usize],
) -> Option<f64> {
    let mut adjacent: Vec<usize> = neighbors[node.index()]
        .iter()
        .filter(|&&other| layers[other.index()] == fixed_layer)
        .map(|&other| positions[other.index()])
        .collect();

    if adjacent.is_empty() {
        return None;
    }

    adjacent.sort_unstable();
    let mid = adjacent.len() / 2;
    if adjacent.len() % 2 == 1 {
        Some(adjacent[mid] as f64)
    } else {
        Some((adjacent[mid - 1] + adjacent[mid]) as f64 / 2.0)
    }
}

/// Counts crossings between every pair of adjacent layers.
fn count_crossings(graph: &Graph, layers: &[usize], positions: &[usize]) -> usize {
    let mut spans: Vec<(usize, usize, usize)> = Vec::new();

    for idx in graph.link_indices() {
        let (source, target) = graph.link_endpoints(idx);
        if source == target
            || graph.node(source).pinned()
            || graph.node(target).pinned()
        {
            continue;
        }

        let (src_layer, dst_layer) = (layers[source.index()], layers[target.index()]);
        let (upper, lower) = if src_layer < dst_layer {
            (source, target)
        } else {
            (target, source)
        };
        if layers[lower.index()] - layers[upper.index()] != 1 {
            continue;
        }

        spans.push((
            layers[upper.index()],
            positions[upper.index()],
            positions[lower.index()],
        ));
    }

    let mut crossings = 0;
    for (i, &(layer_a, up_a, down_a)) in spans.iter().enumerate() {
        for &(layer_b, up_b, down_b) in &spans[i + 1..] {
            if layer_a == layer_b
                && ((up_a < up_b && down_a > down_b) || (up_a > up_b && down_a < down_b))
            {
                crossings += 1;
            }
        }
    }
    crossings
}

fn refresh_positions(orderings: &[Vec<NodeIndex>], positions: &mut [usize]) {
    for layer in orderings {
        for (pos, &node) in layer.iter().enumerate() {
            positions[node.index()] = pos;
        }
    }
}

/// Undirected adjacency between unpinned nodes, self-links excluded.
fn neighbor_lists(graph: &Graph) -> Vec<Vec<NodeIndex>> {
    let mut neighbors: Vec<Vec<NodeIndex>> = vec![Vec::new(); graph.node_count()];
    for idx in graph.link_indices() {
        let (source, target) = graph.link_endpoints(idx);
        if source == target
            || graph.node(source).pinned()
            || graph.node(target).pinned()
        {
            continue;
        }
        neighbors[source.index()].push(target);
        neighbors[target.index()].push(source);
    }
    neighbors
}
