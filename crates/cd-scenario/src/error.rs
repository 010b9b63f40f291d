//! Error types for scenario loading and traversal.

use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeId;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur while loading or playing a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The graph is malformed or the requested entry point does not exist.
    #[error("invalid scenario graph: {0}")]
    InvalidGraph(#[from] GraphError),

    /// The choice index is out of range for the current node.
    #[error("invalid choice {index} at node {node}: {available} available")]
    InvalidChoice {
        /// Node the choice was attempted on.
        node: NodeId,
        /// Requested choice index.
        index: usize,
        /// Number of choices the node offers.
        available: usize,
    },

    /// The current node is branching and needs a choice, not an advance.
    #[error("node {0} is waiting for a choice")]
    AwaitingChoice(NodeId),

    /// Taking the choice would push the affection total past the `i32` range.
    #[error("affection total overflows at node {node}")]
    DeltaOverflow {
        /// Node the choice was taken on.
        node: NodeId,
    },

    /// The run already reached the end of the scenario.
    #[error("scenario is already complete")]
    Finished,

    /// The run has not reached the end of the scenario yet.
    #[error("scenario is still running at node {0}")]
    StillRunning(NodeId),

    /// No scenario with this id exists in the catalog.
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    /// A scenario file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A scenario document is not valid JSON or has the wrong shape.
    #[error("malformed scenario document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural defects found while building a [`ScenarioGraph`](crate::ScenarioGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The graph has no nodes at all.
    #[error("graph has no nodes")]
    Empty,

    /// Two nodes share the same id.
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// A node uses a negative id, which collides with the completion sentinel.
    #[error("node id {0} is reserved")]
    ReservedId(NodeId),

    /// A node has both choices and a linear successor.
    #[error("node {0} has both choices and a next node")]
    AmbiguousLinks(NodeId),

    /// A node declares a choice list with nothing in it.
    #[error("node {0} has an empty choice list")]
    NoChoices(NodeId),

    /// A link points at a node that does not exist.
    #[error("node {from} links to missing node {to}")]
    DanglingLink {
        /// Node holding the link.
        from: NodeId,
        /// Missing target.
        to: NodeId,
    },

    /// The entry node does not exist.
    #[error("entry node {0} does not exist")]
    MissingEntry(NodeId),

    /// A node was looked up that is not part of the graph.
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    /// Following links from this node leads back to it.
    #[error("cycle through node {0}")]
    Cycle(NodeId),
}
