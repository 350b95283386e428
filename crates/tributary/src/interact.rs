//! Interactive placement state machine.
//!
//! Re-expresses the select/drag handling of the diagram surface as an
//! explicit finite state machine so transition legality is checkable
//! independent of any UI toolkit. The host surface delivers `click`,
//! `pointer_move`, and `release` events serially; events with no matching
//! transition are silently ignored, which is intentional permissiveness
//! for a UI event stream.
//!
//! Releasing a drag pins the node: a node once manually moved is excluded
//! from future automatic layout passes until explicitly unpinned via
//! [`Graph::set_pinned`].

use log::trace;
use petgraph::graph::NodeIndex;

use crate::{
    geometry::{Point, Size},
    graph::Graph,
};

/// Grid-snap configuration.
///
/// When enabled, dragged positions are quantized to the center of the
/// grid cell under the pointer. Toggling the grid affects quantization
/// only; nodes already placed are never moved retroactively.
#[derive(Debug, Clone, Copy)]
pub struct GridSettings {
    enabled: bool,
    cell: Size,
}

impl GridSettings {
    pub fn new(enabled: bool, cell: Size) -> Self {
        Self { enabled, cell }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn cell(&self) -> Size {
        self.cell
    }

    /// Quantizes a point to the nearest grid cell center.
    pub fn snap(&self, point: Point) -> Point {
        Point::new(
            ((point.x() / self.cell.width()).floor() + 0.5) * self.cell.width(),
            ((point.y() / self.cell.height()).floor() + 0.5) * self.cell.height(),
        )
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            cell: Size::new(160.0, 100.0),
        }
    }
}

/// States of the placement machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Selected(NodeIndex),
    Dragging {
        node: NodeIndex,
        /// Pointer-to-node-origin vector at drag start, keeping the
        /// pointer-node alignment constant during the drag.
        offset: Point,
    },
}

/// Tracks selection, drag, and grid-snap state for one diagram surface.
#[derive(Debug)]
pub struct Interaction {
    state: DragState,
    grid: GridSettings,
}

impl Interaction {
    pub fn new() -> Self {
        Self::with_grid(GridSettings::default())
    }

    pub fn with_grid(grid: GridSettings) -> Self {
        Self {
            state: DragState::Idle,
            grid,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The currently selected node, whether resting or mid-drag.
    pub fn selected(&self) -> Option<NodeIndex> {
        match self.state {
            DragState::Idle => None,
            DragState::Selected(node) | DragState::Dragging { node, .. } => Some(node),
        }
    }

    pub fn grid(&self) -> GridSettings {
        self.grid
    }

    /// Toggles grid snapping. A side command, not a state transition.
    pub fn toggle_grid(&mut self) {
        self.grid.enabled = !self.grid.enabled;
        trace!(enabled = self.grid.enabled; "Grid toggled");
    }

    /// Handles a click at the given point.
    pub fn click(&mut self, graph: &mut Graph, point: Point) {
        self.state = match self.state {
            DragState::Idle => match graph.hit_test(point) {
                Some(node) => DragState::Selected(node),
                None => DragState::Idle,
            },
            DragState::Selected(selected) => match graph.hit_test(point) {
                Some(node) if node == selected => DragState::Dragging {
                    node,
                    offset: point.sub_point(graph.node(node).position()),
                },
                Some(node) => DragState::Selected(node),
                None => DragState::Idle,
            },
            // Clicks cannot arrive mid-drag; the surface reports a
            // release first. Keep the state if one does.
            dragging @ DragState::Dragging { .. } => dragging,
        };
    }

    /// Handles pointer movement; only meaningful while dragging.
    pub fn pointer_move(&mut self, graph: &mut Graph, point: Point) {
        if let DragState::Dragging { node, offset } = self.state {
            let mut position = point.sub_point(offset);
            if self.grid.enabled {
                position = self.grid.snap(position);
            }
            graph.set_position(node, position);
        }
    }

    /// Handles pointer release, committing the drag and pinning the node.
    pub fn release(&mut self, graph: &mut Graph) {
        if let DragState::Dragging { node, .. } = self.state {
            graph.set_pinned(node, true);
            trace!(node = graph.node(node).id().as_str(); "Node pinned");
            self.state = DragState::Idle;
        }
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}
