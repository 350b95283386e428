//! Serializable snapshot of a laid-out graph.
//!
//! The snapshot is the CLI's output format: flattened node and link
//! records with resolved positions, sizes, pin state, and feedback flags,
//! in declaration order. It carries everything a renderer needs without
//! exposing the graph structure itself.

use serde::Serialize;

use crate::graph::{Graph, NodeId, PortRef};

/// One laid-out node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub label: String,
    /// Center position.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub pinned: bool,
    /// Port names in declaration order, for drawing attachment stubs.
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// One link with its resolved feedback flag.
#[derive(Debug, Clone, Serialize)]
pub struct LinkSnapshot {
    pub source: PortRef,
    pub target: PortRef,
    pub feedback: bool,
}

/// The complete layout result.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub links: Vec<LinkSnapshot>,
}

impl LayoutSnapshot {
    /// Captures the current state of the graph, nodes and links in
    /// declaration order.
    pub fn capture(graph: &Graph) -> Self {
        let nodes = graph
            .nodes_with_indices()
            .map(|(_, node)| {
                let position = node.position();
                NodeSnapshot {
                    id: node.id().clone(),
                    label: node.label().to_owned(),
                    x: position.x(),
                    y: position.y(),
                    width: node.size().width(),
                    height: node.size().height(),
                    pinned: node.pinned(),
                    inputs: node.inputs().iter().map(|p| p.name().to_owned()).collect(),
                    outputs: node.outputs().iter().map(|p| p.name().to_owned()).collect(),
                }
            })
            .collect();

        let links = graph
            .link_indices()
            .map(|idx| {
                let link = graph.link(idx);
                LinkSnapshot {
                    source: link.source().clone(),
                    target: link.target().clone(),
                    feedback: link.feedback(),
                }
            })
            .collect();

        Self { nodes, links }
    }
}
