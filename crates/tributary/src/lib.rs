//! Tributary lays out coupling graphs of components and adapters.
//!
//! The crate takes a node/link extraction ([`GraphInput`]) and produces
//! positions for every node. Three cooperating surfaces share one
//! [`Graph`]:
//!
//! - [`layout::Engine`] runs the automatic layered layout: cycle
//!   breaking, longest-path layering, crossing reduction, and coordinate
//!   assignment.
//! - [`interact::Interaction`] is the select/drag/grid state machine for
//!   a host UI surface; releasing a drag pins the node.
//! - [`place`] applies scripted placements from a position file,
//!   pinning nodes the same way a drag would.
//!
//! Pinned nodes keep their coordinates across layout runs, so manual
//! arrangements survive relayouts. [`snapshot::LayoutSnapshot`] captures
//! the result for serialization. All operations are single-threaded and
//! deterministic for a given input.

pub mod error;
pub mod geometry;
pub mod graph;
pub mod interact;
pub mod layout;
pub mod place;
pub mod snapshot;

pub use error::TributaryError;
pub use graph::{Graph, GraphInput, LinkDecl, NodeDecl, NodeId, PortRef};
