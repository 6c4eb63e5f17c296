//! Hierholzer's algorithm: extracts an Eulerian circuit from a connected,
//! even-degree multigraph.
//!
//! Implemented iteratively with an explicit stack (no recursion, so it
//! cannot blow the stack on a long straight run of streets). Each stack
//! frame additionally carries the edge used to reach it, so that when a
//! frame is popped for having no more unused edges, the edge connecting it
//! to its parent can be emitted as one `EdgeTraversal` — a standard
//! adaptation of the "push nodes, emit on dead end" formulation (see e.g.
//! `TheAlgorithms::graph::eulerian_path`) to also track which edge was
//! walked, which parallel/duplicated edges require.

use indexmap::IndexMap;

use crate::augment::AugmentedAdjacency;
use crate::graph::{EdgeId, NodeId};

/// One traversal of an edge in a fixed direction: `{from_node, to_node} =
/// {edge.from, edge.to}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeTraversal {
    pub edge: EdgeId,
    pub from_node: NodeId,
    pub to_node: NodeId,
}

/// Extracts an Eulerian circuit starting (and ending) at `start`.
///
/// Precondition: the augmented graph is connected on the set of nodes with
/// positive degree, and every such node has even degree. Violating this
/// produces a circuit covering only `start`'s component, per §4.F.
pub fn hierholzer(adjacency: &AugmentedAdjacency, start: NodeId) -> Vec<EdgeTraversal> {
    let mut working = adjacency.working_copy();

    // Stack entries are (node, incoming edge used to reach it from its
    // parent frame; `None` for the start frame).
    let mut stack: Vec<(NodeId, Option<EdgeId>)> = vec![(start, None)];
    let mut circuit: Vec<EdgeTraversal> = Vec::new();

    while let Some(&(cur, _)) = stack.last() {
        match pop_lowest_unused(&mut working, cur) {
            Some((edge_id, neighbor)) => {
                stack.push((neighbor, Some(edge_id)));
            }
            None => {
                let (node, incoming) = stack.pop().unwrap();
                if let Some(edge_id) = incoming {
                    let &(parent, _) = stack.last().expect("non-start frame has a parent");
                    circuit.push(EdgeTraversal {
                        edge: edge_id,
                        from_node: parent,
                        to_node: node,
                    });
                }
            }
        }
    }

    circuit.reverse();
    circuit
}

/// Removes and returns the lowest-id unused edge incident on `node`,
/// decrementing the matching copy at the neighbor's side too.
fn pop_lowest_unused(
    working: &mut IndexMap<NodeId, std::collections::BTreeMap<EdgeId, (NodeId, u32)>>,
    node: NodeId,
) -> Option<(EdgeId, NodeId)> {
    let entries = working.get_mut(&node)?;
    let (&edge_id, &(neighbor, _)) = entries.first_key_value()?;
    consume_one(entries, edge_id);
    if let Some(neighbor_entries) = working.get_mut(&neighbor) {
        consume_one(neighbor_entries, edge_id);
    }
    Some((edge_id, neighbor))
}

fn consume_one(entries: &mut std::collections::BTreeMap<EdgeId, (NodeId, u32)>, edge_id: EdgeId) {
    if let std::collections::btree_map::Entry::Occupied(mut occ) = entries.entry(edge_id) {
        let (_, count) = occ.get_mut();
        *count -= 1;
        if *count == 0 {
            occ.remove();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::augment::augment;
    use crate::graph::test_util::line_graph;
    use crate::shortest_paths::apsp_among;

    fn empty_matching_adjacency(g: &crate::graph::Graph) -> AugmentedAdjacency {
        let apsp = apsp_among(g, &[]).unwrap();
        augment(g, &[], &apsp)
    }

    #[test]
    fn triangle_circuit_visits_each_edge_once_and_closes() {
        let g = line_graph(
            &[1, 2, 3],
            &[
                (1, 1, 2, 100.0, None),
                (2, 2, 3, 100.0, None),
                (3, 3, 1, 100.0, None),
            ],
        );
        let adjacency = empty_matching_adjacency(&g);
        let circuit = hierholzer(&adjacency, 1);
        assert_eq!(circuit.len(), 3);
        let mut ids: Vec<_> = circuit.iter().map(|t| t.edge).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(circuit[0].from_node, circuit.last().unwrap().to_node);
        for pair in circuit.windows(2) {
            assert_eq!(pair[0].to_node, pair[1].from_node);
        }
    }

    #[test]
    fn duplicated_edges_are_each_walked_once() {
        let g = line_graph(&[1, 2], &[(1, 1, 2, 100.0, None)]);
        let odd = g.odd_degree_nodes();
        let apsp = apsp_among(&g, &odd).unwrap();
        let adjacency = augment(&g, &[(1, 2)], &apsp);
        let circuit = hierholzer(&adjacency, 1);
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit[0].edge, 1);
        assert_eq!(circuit[1].edge, 1);
        assert_eq!(circuit[0].from_node, 1);
        assert_eq!(circuit[0].to_node, 2);
        assert_eq!(circuit[1].from_node, 2);
        assert_eq!(circuit[1].to_node, 1);
    }

    #[test]
    fn entry_selection_prefers_lowest_edge_id() {
        // Two parallel edges between 1 and 2 plus a return via 3, so the
        // walk has a real choice at node 1.
        let g = line_graph(
            &[1, 2, 3],
            &[
                (3, 1, 2, 100.0, None),
                (1, 1, 3, 100.0, None),
                (2, 3, 2, 100.0, None),
            ],
        );
        let adjacency = empty_matching_adjacency(&g);
        let circuit = hierholzer(&adjacency, 1);
        assert_eq!(circuit[0].edge, 1);
    }
}
