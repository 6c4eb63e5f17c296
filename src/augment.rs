//! Builds the augmented multigraph: the original adjacency plus one extra
//! copy of every edge along each matched pair's shortest path.
//!
//! Duplicated edges keep their original id and length — adjacency gains an
//! extra `(neighbor, edge_id)` entry at each endpoint, the edge object
//! itself is never cloned (§4.E, §9 "Augmentation produces a multigraph").

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::graph::{EdgeId, Graph, NodeId};
use crate::shortest_paths::Apsp;

/// Adjacency index of the augmented graph. Edge lookups (length, name,
/// geometry) still go through the original [`Graph`] — only traversal
/// multiplicity changes.
#[derive(Debug, Clone)]
pub struct AugmentedAdjacency(IndexMap<NodeId, Vec<(NodeId, EdgeId)>>);

impl AugmentedAdjacency {
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, EdgeId)] {
        self.0.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Per-node map of `edge_id -> (neighbor, remaining copies)`, the
    /// working structure Hierholzer mutates as it consumes edges. A
    /// `BTreeMap` keeps `first_key_value` returning the lowest remaining
    /// edge id in `O(log n)`, which is the deterministic entry-selection
    /// rule §5 requires.
    pub(crate) fn working_copy(&self) -> indexmap::IndexMap<NodeId, BTreeMap<EdgeId, (NodeId, u32)>> {
        self.0
            .iter()
            .map(|(&node, entries)| {
                let mut counts: BTreeMap<EdgeId, (NodeId, u32)> = BTreeMap::new();
                for &(neighbor, edge_id) in entries {
                    counts
                        .entry(edge_id)
                        .and_modify(|(_, c)| *c += 1)
                        .or_insert((neighbor, 1));
                }
                (node, counts)
            })
            .collect()
    }
}

/// Duplicates edges along each matched pair's shortest path so every node's
/// degree in the result is even.
pub fn augment(
    graph: &Graph,
    matching: &[(NodeId, NodeId)],
    apsp: &Apsp,
) -> AugmentedAdjacency {
    let mut adjacency: IndexMap<NodeId, Vec<(NodeId, EdgeId)>> = IndexMap::new();
    for node in graph.node_ids() {
        adjacency.insert(node, graph.neighbors(node).to_vec());
    }

    for &(a, b) in matching {
        let path = apsp.path(a, b);
        for (window, &edge_id) in path.node_sequence.windows(2).zip(path.edge_sequence.iter()) {
            let (u, v) = (window[0], window[1]);
            adjacency.entry(u).or_default().push((v, edge_id));
            adjacency.entry(v).or_default().push((u, edge_id));
        }
    }

    AugmentedAdjacency(adjacency)
}
