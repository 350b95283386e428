//! Scripted placement of nodes at explicit coordinates.
//!
//! Mirrors the interactive path: a scripted placement moves a node and
//! pins it, exactly as a drag-release would. Placement maps are applied
//! atomically so a typo in one node id cannot leave the graph half-moved.

use std::collections::BTreeMap;

use log::debug;

use crate::{
    error::UnknownNodeError,
    geometry::Point,
    graph::{Graph, NodeId},
};

/// Node positions keyed by id, as read from a placement file.
///
/// A `BTreeMap` keeps serialized output sorted by id regardless of the
/// order positions were recorded in.
pub type PlacementMap = BTreeMap<NodeId, (f32, f32)>;

/// Applies a placement map to the graph, pinning every placed node.
///
/// Atomic: every id is validated before any node moves, so on error the
/// graph is untouched.
///
/// # Errors
///
/// Returns [`UnknownNodeError`] naming the first id (in map order) that
/// does not exist in the graph.
pub fn apply_placements(graph: &mut Graph, placements: &PlacementMap) -> Result<(), UnknownNodeError> {
    let mut resolved = Vec::with_capacity(placements.len());
    for (id, &(x, y)) in placements {
        match graph.index_of(id) {
            Some(idx) => resolved.push((idx, Point::new(x, y))),
            None => return Err(UnknownNodeError(id.clone())),
        }
    }

    for (idx, position) in resolved {
        graph.set_position(idx, position);
        graph.set_pinned(idx, true);
    }

    debug!(count = placements.len(); "Placements applied");
    Ok(())
}

/// Collects the current positions of all pinned nodes.
///
/// The inverse of [`apply_placements`]: feeding the result back into a
/// fresh graph reproduces the pinned arrangement.
pub fn pinned_placements(graph: &Graph) -> PlacementMap {
    graph
        .nodes_with_indices()
        .filter(|(_, node)| node.pinned())
        .map(|(_, node)| {
            let position = node.position();
            (node.id().clone(), (position.x(), position.y()))
        })
        .collect()
}
