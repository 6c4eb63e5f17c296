//! Immutable undirected multigraph with node coordinates, edge length, edge
//! polyline, and optional edge name.
//!
//! Built once by the graph source and never mutated by the core (§3
//! "Lifecycles"). The adjacency index mirrors the teacher's own
//! `IndexMap<NId, HashSet<E>>` choice in `graph.rs` — an insertion-ordered
//! map keeps iteration deterministic across runs — but stores `Vec<(NodeId,
//! EdgeId)>` sorted by edge id rather than a `HashSet<E>`, since the spec's
//! tie-break policy (§5 "Ordering") requires picking the *lowest-id*
//! adjacency entry, not an arbitrary one.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::geo::Point;

pub type NodeId = u64;
pub type EdgeId = u64;

/// A graph vertex. Degree is derived from edges and is not stored.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub location: Point,
}

/// An undirected street segment.
///
/// `geometry` is an ordered polyline of at least two points whose endpoints
/// equal the coordinates of `from` and `to`, in that order. Traversal in the
/// reverse direction reverses the geometry at traversal time; the `Edge`
/// object itself is never duplicated.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub length: f64,
    pub geometry: Vec<Point>,
    pub name: Option<String>,
}

impl Edge {
    /// The endpoint that is not `id`. Panics if `id` is not an endpoint —
    /// callers only ever invoke this with an endpoint obtained from the
    /// adjacency index, so it is a programming error otherwise.
    pub fn other(&self, id: NodeId) -> NodeId {
        if id == self.from {
            self.to
        } else if id == self.to {
            self.from
        } else {
            panic!("node {id} is not an endpoint of edge {}", self.id);
        }
    }

    /// Geometry in the direction of travel `from_node -> to_node`.
    pub fn geometry_toward(&self, to_node: NodeId) -> Vec<Point> {
        if to_node == self.to {
            self.geometry.clone()
        } else {
            let mut rev = self.geometry.clone();
            rev.reverse();
            rev
        }
    }
}

/// Error constructing a [`Graph`] from raw nodes and edges.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    DuplicateEdgeId(EdgeId),
    UnknownNode { edge: EdgeId, node: NodeId },
    SelfLoop(EdgeId),
    NonPositiveLength(EdgeId),
    ShortGeometry(EdgeId),
    NonFiniteLocation(NodeId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateEdgeId(id) => write!(f, "duplicate edge id {id}"),
            GraphError::UnknownNode { edge, node } => {
                write!(f, "edge {edge} references unknown node {node}")
            }
            GraphError::SelfLoop(id) => write!(f, "edge {id} is a self-loop"),
            GraphError::NonPositiveLength(id) => write!(f, "edge {id} has non-positive length"),
            GraphError::ShortGeometry(id) => {
                write!(f, "edge {id} geometry has fewer than two points")
            }
            GraphError::NonFiniteLocation(id) => write!(f, "node {id} has a non-finite location"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Immutable undirected multigraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    adjacency: IndexMap<NodeId, Vec<(NodeId, EdgeId)>>,
}

impl Graph {
    /// Builds a graph from nodes and edges, validating the §3 invariants
    /// that are cheap to check at the boundary: distinct, known endpoints;
    /// finite, positive lengths; finite node locations; non-degenerate
    /// geometry. The core does not re-validate beyond this point.
    pub fn build(nodes: Vec<(NodeId, Node)>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut node_map = HashMap::with_capacity(nodes.len());
        for (id, n) in nodes {
            if !n.location.lat.is_finite() || !n.location.lng.is_finite() {
                return Err(GraphError::NonFiniteLocation(id));
            }
            node_map.insert(id, n);
        }

        let mut edge_map: IndexMap<EdgeId, Edge> = IndexMap::with_capacity(edges.len());
        let mut adjacency: IndexMap<NodeId, Vec<(NodeId, EdgeId)>> = IndexMap::new();
        for e in edges {
            if edge_map.contains_key(&e.id) {
                return Err(GraphError::DuplicateEdgeId(e.id));
            }
            if e.from == e.to {
                return Err(GraphError::SelfLoop(e.id));
            }
            if !node_map.contains_key(&e.from) {
                return Err(GraphError::UnknownNode {
                    edge: e.id,
                    node: e.from,
                });
            }
            if !node_map.contains_key(&e.to) {
                return Err(GraphError::UnknownNode {
                    edge: e.id,
                    node: e.to,
                });
            }
            if !(e.length.is_finite() && e.length > 0.0) {
                return Err(GraphError::NonPositiveLength(e.id));
            }
            if e.geometry.len() < 2 {
                return Err(GraphError::ShortGeometry(e.id));
            }

            adjacency.entry(e.from).or_default().push((e.to, e.id));
            adjacency.entry(e.to).or_default().push((e.from, e.id));
            edge_map.insert(e.id, e);
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_by_key(|(_, edge_id)| *edge_id);
        }

        Ok(Self {
            nodes: node_map,
            edges: edge_map,
            adjacency,
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node ids with at least one incident edge.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Adjacency entries for a node, sorted ascending by edge id — the
    /// order Dijkstra relaxation and Hierholzer entry selection rely on for
    /// deterministic tie-breaking (§5 "Ordering").
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, EdgeId)] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Node ids with odd degree, ascending.
    pub fn odd_degree_nodes(&self) -> Vec<NodeId> {
        let mut odd: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|&n| self.degree(n) % 2 == 1)
            .collect();
        odd.sort_unstable();
        odd
    }

    /// The lowest-id node with at least one incident edge, if any.
    pub fn any_positive_degree_node(&self) -> Option<NodeId> {
        self.nodes
            .keys()
            .copied()
            .filter(|&n| self.degree(n) > 0)
            .min()
    }

    /// Nodes and edges reachable from `start` by walking adjacency entries
    /// (undirected BFS). Used to restrict `solve` to the start node's
    /// connected component per §7's default `Disconnected` policy.
    pub fn reachable_component(&self, start: NodeId) -> (Vec<NodeId>, Vec<EdgeId>) {
        let mut seen_nodes = std::collections::HashSet::new();
        let mut seen_edges = std::collections::HashSet::new();
        let mut queue = std::collections::VecDeque::new();
        seen_nodes.insert(start);
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            for &(v, edge_id) in self.neighbors(u) {
                seen_edges.insert(edge_id);
                if seen_nodes.insert(v) {
                    queue.push_back(v);
                }
            }
        }
        let mut nodes: Vec<_> = seen_nodes.into_iter().collect();
        nodes.sort_unstable();
        let mut edges: Vec<_> = seen_edges.into_iter().collect();
        edges.sort_unstable();
        (nodes, edges)
    }
}
