//! Layered layout engine for coupling graphs.
//!
//! The engine runs the classical three-phase layered drawing approach on a
//! [`Graph`](crate::Graph): cycle breaking (back-links are flagged feedback
//! and reversed for ranking only), longest-path layer assignment, a bounded
//! median-heuristic crossing-reduction sweep, and coordinate assignment.
//! The flow axis is horizontal: a node's layer determines its x position,
//! its order within the layer determines y.
//!
//! Pinned nodes keep their coordinates and are excluded from reordering and
//! placement; unpinned nodes are packed around their bounding boxes. The
//! exact crossing heuristic and pass bound are implementation details of
//! the engine, not part of its contract.

mod coords;
mod ordering;
mod rank;

use log::debug;

use crate::graph::Graph;

/// The layered layout engine.
///
/// Configured with spacing constants and a sweep bound; [`Engine::run`]
/// mutates node positions in place and reports diagnostics.
pub struct Engine {
    /// Edge-to-edge gap between adjacent layers along the flow axis.
    layer_gap: f32,

    /// Minimum gap between node bounding boxes within a layer.
    node_gap: f32,

    /// Margin from the origin to the first layer and the first node.
    margin: f32,

    /// Upper bound on crossing-reduction sweeps.
    max_sweeps: usize,
}

impl Engine {
    /// Create a new engine with default spacing.
    pub fn new() -> Self {
        Self {
            layer_gap: 80.0,
            node_gap: 40.0,
            margin: 50.0,
            max_sweeps: 24,
        }
    }

    /// Set the edge-to-edge gap between adjacent layers.
    pub fn set_layer_gap(&mut self, gap: f32) -> &mut Self {
        self.layer_gap = gap;
        self
    }

    /// Set the minimum gap between node bounding boxes within a layer.
    pub fn set_node_gap(&mut self, gap: f32) -> &mut Self {
        self.node_gap = gap;
        self
    }

    /// Set the margin before the first layer.
    pub fn set_margin(&mut self, margin: f32) -> &mut Self {
        self.margin = margin;
        self
    }

    /// Set the upper bound on crossing-reduction sweeps.
    pub fn set_max_sweeps(&mut self, sweeps: usize) -> &mut Self {
        self.max_sweeps = sweeps;
        self
    }

    /// Compute a layout for the graph, mutating unpinned node positions.
    ///
    /// Deterministic for a given graph, pin set, and sweep bound. If the
    /// sweep bound is exhausted, the best ordering seen is kept; the
    /// remaining crossing count is reported in the [`LayoutReport`], not
    /// raised as an error.
    pub fn run(&self, graph: &mut Graph) -> LayoutReport {
        rank::break_cycles(graph);
        let layers = rank::assign_layers(graph);

        let outcome = ordering::minimize_crossings(graph, &layers, self.max_sweeps);
        coords::assign_coordinates(
            graph,
            &outcome.orderings,
            self.layer_gap,
            self.node_gap,
            self.margin,
        );

        debug!(
            crossings = outcome.crossings,
            sweeps = outcome.sweeps;
            "Layout calculated"
        );

        LayoutReport {
            crossings: outcome.crossings,
            sweeps: outcome.sweeps,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostics from a layout run, for caller-side logging.
#[derive(Debug, Clone, Copy)]
pub struct LayoutReport {
    crossings: usize,
    sweeps: usize,
}

impl LayoutReport {
    /// Number of link crossings between adjacent layers in the kept ordering.
    pub fn crossings(self) -> usize {
        self.crossings
    }

    /// Number of crossing-reduction sweeps that ran.
    pub fn sweeps(self) -> usize {
        self.sweeps
    }
}
