//! Error types for the solver and instruction generator.
//!
//! Hand-rolled `Display`/`std::error::Error` impls, same shape as the pack's
//! library-boundary error enums (e.g. `butterfly-common::error::Error`) —
//! no partial results are ever attached, matching §7's "errors propagate to
//! the caller without partial output".

use std::fmt;

use crate::graph::{EdgeId, NodeId};

/// Errors `solve` can return.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The graph has zero edges.
    EmptyGraph,
    /// Positive-degree nodes partition into two or more components; `solve`
    /// proceeds on the component containing the start node and lists the
    /// edges it could not reach.
    Disconnected { unreached_edge_ids: Vec<EdgeId> },
    /// APSP could not connect two odd-degree vertices (only possible if the
    /// component restriction above has a bug — kept as a typed, recoverable
    /// error rather than a panic).
    UnreachableOdd { source: NodeId, target: NodeId },
    /// The matcher was handed an odd-sized vertex set — a handshake-lemma
    /// violation, meaning the graph (or degree bookkeeping) is malformed.
    OddCardinality(usize),
    /// The caller's cancellation predicate returned `true`.
    Cancelled,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::EmptyGraph => write!(f, "graph has no edges"),
            SolveError::Disconnected { unreached_edge_ids } => write!(
                f,
                "graph is disconnected: {} edge(s) not reachable from the start component",
                unreached_edge_ids.len()
            ),
            SolveError::UnreachableOdd { source, target } => write!(
                f,
                "no path between odd-degree vertices {source} and {target}"
            ),
            SolveError::OddCardinality(k) => {
                write!(f, "matcher received an odd-sized vertex set (k = {k})")
            }
            SolveError::Cancelled => write!(f, "solve was cancelled"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Errors `instructions_for` can return.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionError {
    /// The edge-traversal sequence was empty; there is nothing to narrate.
    EmptyCircuit,
    /// A traversal referenced a node id absent from the graph.
    MissingNode(NodeId),
}

impl fmt::Display for InstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionError::EmptyCircuit => write!(f, "edge-traversal circuit is empty"),
            InstructionError::MissingNode(id) => write!(f, "node {id} not found in graph"),
        }
    }
}

impl std::error::Error for InstructionError {}
