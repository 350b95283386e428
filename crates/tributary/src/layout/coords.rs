//! Coordinate assignment for ordered layers.
//!
//! Layers advance left to right along the flow axis; nodes within a layer
//! stack top to bottom in crossing-reduction order. Layer x positions
//! account for the widest box in each layer, so boxes of unpinned nodes in
//! different layers can never meet. Within a layer, boxes are packed with
//! the configured gap, skipping past any pinned bounding box in the way.

use petgraph::graph::NodeIndex;

use crate::{
    geometry::{Bounds, Point},
    graph::Graph,
};

pub(crate) fn assign_coordinates(
    graph: &mut Graph,
    orderings: &[Vec<NodeIndex>],
    layer_gap: f32,
    node_gap: f32,
    margin: f32,
) {
    let pinned_bounds: Vec<Bounds> = graph
        .nodes_with_indices()
        .filter(|(_, node)| node.pinned())
        .map(|(_, node)| node.bounds())
        .collect();

    // Center of each layer's x band, advanced by the widest unpinned box.
    let mut layer_centers = Vec::with_capacity(orderings.len());
    let mut cursor_x = margin;
    for layer in orderings {
        let width = layer
            .iter()
            .map(|&idx| graph.node(idx).size().width())
            .fold(0.0f32, f32::max);
        layer_centers.push(cursor_x + width / 2.0);
        cursor_x += width + layer_gap;
    }

    for (layer_idx, layer) in orderings.iter().enumerate() {
        let center_x = layer_centers[layer_idx];
        let mut cursor_y = margin;

        for &idx in layer {
            let size = graph.node(idx).size();
            let mut position = Point::new(center_x, cursor_y + size.height() / 2.0);

            // Skip past pinned boxes occupying the candidate slot. The
            // cursor only moves down, so this terminates.
            loop {
                let candidate = position.to_bounds(size);
                match pinned_bounds
                    .iter()
                    .find(|pinned| pinned.intersects(candidate))
                {
                    Some(pinned) => {
                        cursor_y = pinned.max_y() + node_gap;
                        position = Point::new(center_x, cursor_y + size.height() / 2.0);
                    }
                    None => break,
                }
            }

            graph.set_position(idx, position);
            cursor_y = position.y() + size.height() / 2.0 + node_gap;
        }
    }
}
