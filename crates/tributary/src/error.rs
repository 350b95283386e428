//! Error types for Tributary operations.
//!
//! Structural problems are reported by [`InvalidGraphError`] at graph-build
//! time, before any layout runs; layout and interaction code assume a
//! well-formed graph afterwards. [`UnknownNodeError`] is fatal only to the
//! scripted-placement call that raised it. The top-level [`TributaryError`]
//! wraps both together with the I/O and decoding failures seen by the CLI.

use std::io;

use thiserror::Error;

use crate::graph::{Direction, NodeId};

/// Malformed structural input, detected when building a [`crate::Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraphError {
    #[error("duplicate node id `{0}`")]
    DuplicateNode(NodeId),

    #[error("link references unknown node `{0}`")]
    UnknownNode(NodeId),

    #[error("node `{node}` has no {direction} port named `{port}`")]
    UnknownPort {
        node: NodeId,
        port: String,
        direction: Direction,
    },

    #[error("port `{port}` on node `{node}` is declared {actual} but used as {used}")]
    DirectionMismatch {
        node: NodeId,
        port: String,
        actual: Direction,
        used: Direction,
    },
}

/// A scripted placement referenced a node that is not in the graph.
///
/// The placement call that produced this error left the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("placement references unknown node `{0}`")]
pub struct UnknownNodeError(pub NodeId);

/// The main error type for Tributary operations.
#[derive(Debug, Error)]
pub enum TributaryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraphError),

    #[error(transparent)]
    UnknownNode(#[from] UnknownNodeError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
