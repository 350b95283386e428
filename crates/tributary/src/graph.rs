//! The in-memory node/link structure consumed by layout and interaction.
//!
//! A [`Graph`] is built once from the extraction collaborator's node and
//! link declarations ([`NodeDecl`], [`LinkDecl`]) and is structurally
//! immutable afterwards: only node positions, pinned flags, and the
//! layout-owned feedback flags may change. All structural validation
//! happens in [`Graph::build`], never lazily during layout or interaction.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::{
    error::InvalidGraphError,
    geometry::{Point, Size},
};

/// Default bounding box for nodes whose declaration carries no size.
pub const DEFAULT_NODE_SIZE: Size = Size::new(80.0, 60.0);

/// Identifier of a node, unique within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
        }
    }
}

/// A named slot on a node through which links attach.
#[derive(Debug, Clone)]
pub struct Port {
    name: String,
    direction: Direction,
}

impl Port {
    fn new(name: String, direction: Direction) -> Self {
        Self { name, direction }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Reference to a port on a named node, as used by link declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node: NodeId,
    pub port: String,
}

impl PortRef {
    pub fn new(node: impl Into<NodeId>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.node, self.port)
    }
}

/// Node declaration from the extraction collaborator.
///
/// Components and adapters both arrive in this shape; an adapter is an
/// ordinary node that typically declares a single input and output.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDecl {
    pub id: NodeId,

    /// Display label; defaults to the node id.
    #[serde(default)]
    pub label: Option<String>,

    /// Input port names, in declaration order.
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Output port names, in declaration order.
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Bounding box as `(width, height)`; defaults to [`DEFAULT_NODE_SIZE`].
    #[serde(default)]
    pub size: Option<(f32, f32)>,
}

impl NodeDecl {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            size: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_inputs<I: Into<String>>(mut self, inputs: impl IntoIterator<Item = I>) -> Self {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outputs<I: Into<String>>(mut self, outputs: impl IntoIterator<Item = I>) -> Self {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some((width, height));
        self
    }
}

/// Link declaration from the extraction collaborator.
///
/// The source must name an output port and the target an input port.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkDecl {
    pub source: PortRef,
    pub target: PortRef,
}

impl LinkDecl {
    pub fn new(source: PortRef, target: PortRef) -> Self {
        Self { source, target }
    }
}

/// The full extraction input: a node list and a link list.
///
/// This is the only accepted input shape, and doubles as the JSON schema
/// read by the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<NodeDecl>,
    pub links: Vec<LinkDecl>,
}

/// A node of the coupling graph.
///
/// Created at graph-build time and never destroyed during a session;
/// position and the pinned flag are the only mutable state.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    label: String,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
    size: Size,
    position: Point,
    pinned: bool,
}

impl Node {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Current position of the node's center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// True once the node has been explicitly placed by user or script.
    ///
    /// Pinned nodes are excluded from automatic repositioning until
    /// explicitly unpinned.
    pub fn pinned(&self) -> bool {
        self.pinned
    }

    /// Bounding box at the node's current position.
    pub fn bounds(&self) -> crate::geometry::Bounds {
        self.position.to_bounds(self.size)
    }
}

/// A directed link between an output port and an input port.
///
/// Links are immutable once the graph is built, except for the feedback
/// flag which cycle breaking assigns. The stored direction is always the
/// original one; reversal for ranking never touches the link itself.
#[derive(Debug)]
pub struct Link {
    source: PortRef,
    target: PortRef,
    feedback: bool,
}

impl Link {
    pub fn source(&self) -> &PortRef {
        &self.source
    }

    pub fn target(&self) -> &PortRef {
        &self.target
    }

    /// True if ranking treats this link as reversed to break a cycle.
    ///
    /// The renderer uses this to route back-links distinctly.
    pub fn feedback(&self) -> bool {
        self.feedback
    }
}

/// Graph of components and adapters with their coupling links.
#[derive(Debug)]
pub struct Graph {
    graph: DiGraph<Node, Link>,
    node_ids: IndexMap<NodeId, NodeIndex>,
}

impl Graph {
    /// Builds a graph from extraction declarations, validating all
    /// structural references.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphError`] if two nodes share an id, a link
    /// names a missing node or port, or a link attaches to a port against
    /// its declared direction.
    pub fn build(nodes: Vec<NodeDecl>, links: Vec<LinkDecl>) -> Result<Self, InvalidGraphError> {
        let mut graph = DiGraph::with_capacity(nodes.len(), links.len());
        let mut node_ids = IndexMap::with_capacity(nodes.len());

        for decl in nodes {
            if node_ids.contains_key(&decl.id) {
                return Err(InvalidGraphError::DuplicateNode(decl.id));
            }

            let label = decl.label.unwrap_or_else(|| decl.id.as_str().to_owned());
            let size = decl
                .size
                .map_or(DEFAULT_NODE_SIZE, |(w, h)| Size::new(w, h));

            let node = Node {
                id: decl.id.clone(),
                label,
                inputs: decl
                    .inputs
                    .into_iter()
                    .map(|name| Port::new(name, Direction::Input))
                    .collect(),
                outputs: decl
                    .outputs
                    .into_iter()
                    .map(|name| Port::new(name, Direction::Output))
                    .collect(),
                size,
                position: Point::default(),
                pinned: false,
            };

            let idx = graph.add_node(node);
            node_ids.insert(decl.id, idx);
        }

        for decl in links {
            let source_idx = resolve_port(&graph, &node_ids, &decl.source, Direction::Output)?;
            let target_idx = resolve_port(&graph, &node_ids, &decl.target, Direction::Input)?;

            graph.add_edge(
                source_idx,
                target_idx,
                Link {
                    source: decl.source,
                    target: decl.target,
                    feedback: false,
                },
            );
        }

        debug!(
            nodes = graph.node_count(),
            links = graph.edge_count();
            "Graph built"
        );

        Ok(Self { graph, node_ids })
    }

    /// Builds a graph from the full extraction input.
    pub fn from_input(input: GraphInput) -> Result<Self, InvalidGraphError> {
        Self::build(input.nodes, input.links)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in declaration order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.node_ids.values().copied()
    }

    pub fn nodes_with_indices(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.node_indices().map(|idx| (idx, self.node(idx)))
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        self.graph
            .node_weight(idx)
            .expect("Node index should exist")
    }

    /// Looks up a node index by id.
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    /// Link indices in declaration order.
    pub fn link_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn link(&self, idx: EdgeIndex) -> &Link {
        self.graph
            .edge_weight(idx)
            .expect("Link index should exist")
    }

    pub fn link_endpoints(&self, idx: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph
            .edge_endpoints(idx)
            .expect("Link index should exist")
    }

    /// Moves a node to the given center position.
    pub fn set_position(&mut self, idx: NodeIndex, position: Point) {
        self.node_mut(idx).position = position;
    }

    /// Pins or unpins a node.
    ///
    /// A pinned node keeps its position across layout runs.
    pub fn set_pinned(&mut self, idx: NodeIndex, pinned: bool) {
        self.node_mut(idx).pinned = pinned;
    }

    pub(crate) fn set_feedback(&mut self, idx: EdgeIndex, feedback: bool) {
        self.graph
            .edge_weight_mut(idx)
            .expect("Link index should exist")
            .feedback = feedback;
    }

    /// Finds the topmost node whose bounding box contains the point.
    ///
    /// When boxes overlap, the last-declared node wins, matching the
    /// order nodes are painted in.
    pub fn hit_test(&self, point: Point) -> Option<NodeIndex> {
        self.node_ids
            .values()
            .rev()
            .copied()
            .find(|&idx| self.node(idx).bounds().contains(point))
    }

    fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        self.graph
            .node_weight_mut(idx)
            .expect("Node index should exist")
    }
}

fn resolve_port(
    graph: &DiGraph<Node, Link>,
    node_ids: &IndexMap<NodeId, NodeIndex>,
    port_ref: &PortRef,
    used: Direction,
) -> Result<NodeIndex, InvalidGraphError> {
    let Some(&idx) = node_ids.get(&port_ref.node) else {
        return Err(InvalidGraphError::UnknownNode(port_ref.node.clone()));
    };

    let node = graph.node_weight(idx).expect("Node index should exist");
    let (expected_ports, opposite_ports) = match used {
        Direction::Output => (&node.outputs, &node.inputs),
        Direction::Input => (&node.inputs, &node.outputs),
    };

    if expected_ports.iter().any(|p| p.name == port_ref.port) {
        return Ok(idx);
    }

    if opposite_ports.iter().any(|p| p.name == port_ref.port) {
        return Err(InvalidGraphError::DirectionMismatch {
            node: port_ref.node.clone(),
            port: port_ref.port.clone(),
            actual: match used {
                Direction::Output => Direction::Input,
                Direction::Input => Direction::Output,
            },
            used,
        });
    }

    Err(InvalidGraphError::UnknownPort {
        node: port_ref.node.clone(),
        port: port_ref.port.clone(),
        direction: used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(src_node: &str, src_port: &str, dst_node: &str, dst_port: &str) -> LinkDecl {
        LinkDecl::new(
            PortRef::new(src_node, src_port),
            PortRef::new(dst_node, dst_port),
        )
    }

    fn two_nodes() -> Vec<NodeDecl> {
        vec![
            NodeDecl::new("a").with_outputs(["out"]),
            NodeDecl::new("b").with_inputs(["in"]),
        ]
    }

    #[test]
    fn test_build_valid_graph() {
        let graph = Graph::build(two_nodes(), vec![link("a", "out", "b", "in")]).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 1);

        let a = graph.index_of(&"a".into()).unwrap();
        assert_eq!(graph.node(a).label(), "a");
        assert_eq!(graph.node(a).size(), DEFAULT_NODE_SIZE);
        assert!(!graph.node(a).pinned());
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let nodes = vec![NodeDecl::new("a"), NodeDecl::new("a")];
        let err = Graph::build(nodes, vec![]).unwrap_err();
        assert_eq!(err, InvalidGraphError::DuplicateNode("a".into()));
    }

    #[test]
    fn test_unknown_node_rejected() {
        let err = Graph::build(two_nodes(), vec![link("a", "out", "missing", "in")]).unwrap_err();
        assert_eq!(err, InvalidGraphError::UnknownNode("missing".into()));
    }

    #[test]
    fn test_unknown_port_rejected() {
        let err = Graph::build(two_nodes(), vec![link("a", "typo", "b", "in")]).unwrap_err();
        assert_eq!(
            err,
            InvalidGraphError::UnknownPort {
                node: "a".into(),
                port: "typo".to_owned(),
                direction: Direction::Output,
            }
        );
    }

    #[test]
    fn test_direction_mismatch_rejected() {
        // "in" exists on b, but as an input; using it as a link source
        // must fail with a mismatch, not an unknown port.
        let err = Graph::build(two_nodes(), vec![link("b", "in", "b", "in")]).unwrap_err();
        assert_eq!(
            err,
            InvalidGraphError::DirectionMismatch {
                node: "b".into(),
                port: "in".to_owned(),
                actual: Direction::Input,
                used: Direction::Output,
            }
        );
    }

    #[test]
    fn test_declaration_order_preserved() {
        let nodes = vec![
            NodeDecl::new("z"),
            NodeDecl::new("a"),
            NodeDecl::new("m"),
        ];
        let graph = Graph::build(nodes, vec![]).unwrap();

        let ids: Vec<&str> = graph
            .nodes_with_indices()
            .map(|(_, node)| node.id().as_str())
            .collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut graph = Graph::build(
            vec![NodeDecl::new("under"), NodeDecl::new("over")],
            vec![],
        )
        .unwrap();

        let under = graph.index_of(&"under".into()).unwrap();
        let over = graph.index_of(&"over".into()).unwrap();
        graph.set_position(under, Point::new(100.0, 100.0));
        graph.set_position(over, Point::new(110.0, 100.0));

        // Point inside both boxes: last-declared node wins.
        assert_eq!(graph.hit_test(Point::new(105.0, 100.0)), Some(over));
        // Point only inside the first box.
        assert_eq!(graph.hit_test(Point::new(62.0, 100.0)), Some(under));
        // Point outside both.
        assert_eq!(graph.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_input_json_shape() {
        let raw = r#"{
            "nodes": [
                {"id": "src", "outputs": ["flow"], "size": [80, 60]},
                {"id": "sink", "label": "Sink", "inputs": ["flow"]}
            ],
            "links": [
                {"source": {"node": "src", "port": "flow"},
                 "target": {"node": "sink", "port": "flow"}}
            ]
        }"#;

        let input: GraphInput = serde_json::from_str(raw).unwrap();
        let graph = Graph::from_input(input).unwrap();

        assert_eq!(graph.node_count(), 2);
        let sink = graph.index_of(&"sink".into()).unwrap();
        assert_eq!(graph.node(sink).label(), "Sink");
    }
}
