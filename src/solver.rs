//! Orchestrates the Route Inspection pipeline: odd-vertex detection, APSP,
//! matching, augmentation, and Eulerian circuit extraction, then narrates
//! the result (§4.G).

use serde::{Deserialize, Serialize};

use crate::augment::augment;
use crate::config::{estimated_time_ms, SolverConfig};
use crate::error::SolveError;
use crate::eulerian::{hierholzer, EdgeTraversal};
use crate::geo::Point;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::instructions::{instructions_for, Instruction};
use crate::matching::min_weight_perfect_matching;
use crate::shortest_paths::{apsp_among, Apsp};

/// The solved route: one continuous walk of the whole street network
/// starting and ending at `start`, plus the diagnostics callers need to
/// explain why `total_distance` exceeds `original_distance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub start: NodeId,
    /// Edge ids in the order they are walked; an id appears twice if its
    /// edge was duplicated during augmentation.
    pub edge_order: Vec<EdgeId>,
    /// The walked route as a single polyline, joins deduplicated.
    pub path: Vec<Point>,
    /// Sum of edge lengths actually walked, counting duplicates.
    pub total_distance: f64,
    /// Sum of edge lengths in the reachable component, no duplicates —
    /// the lower bound `total_distance` can never beat.
    pub original_distance: f64,
    /// The set of distinct edge ids duplicated during augmentation —
    /// equivalently, the ids occurring more than once in `edge_order`
    /// (§3). Sorted ascending; an id that lies on more than one matched
    /// pair's shortest path still appears here exactly once.
    pub duplicate_edge_ids: Vec<EdgeId>,
    /// Edges outside `start`'s connected component, present iff the input
    /// graph was disconnected (§7's diagnostic field; absent from spec.md's
    /// literal `RouteResult`, added in `SPEC_FULL.md` §11 to satisfy its
    /// own disconnected-graph requirement).
    pub unreached_edge_ids: Vec<EdgeId>,
    pub instructions: Vec<Instruction>,
    pub estimated_time_ms: u64,
}

/// Solves the Route Inspection problem for `graph`, starting at `start` (or
/// the lowest-id node with positive degree, if `None`).
///
/// `is_cancelled` is polled between phases so a caller can abort a solve
/// over a very large graph without waiting for it to run to completion; an
/// abort returns [`SolveError::Cancelled`] with no partial `RouteResult`.
pub fn solve(
    graph: &Graph,
    start: Option<NodeId>,
    config: &SolverConfig,
    is_cancelled: impl Fn() -> bool,
) -> Result<RouteResult, SolveError> {
    if graph.edge_count() == 0 {
        return Err(SolveError::EmptyGraph);
    }
    // §4.G: default start is the lowest-id odd-degree vertex; only an
    // already-Eulerian graph (no odd vertices at all) falls back to the
    // lowest-id positive-degree node.
    let global_odd = graph.odd_degree_nodes();
    let start = start
        .or_else(|| global_odd.first().copied())
        .or_else(|| graph.any_positive_degree_node())
        .expect("edge_count() > 0 implies a positive-degree node exists");

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let (component_nodes, component_edges) = graph.reachable_component(start);
    let component_edge_set: std::collections::HashSet<EdgeId> =
        component_edges.iter().copied().collect();
    let unreached_edge_ids: Vec<EdgeId> = graph
        .edges()
        .map(|e| e.id)
        .filter(|id| !component_edge_set.contains(id))
        .collect();
    let original_distance: f64 = component_edges
        .iter()
        .map(|&id| graph.edge(id).expect("component edge id exists").length)
        .sum();
    log::debug!(
        "solving from node {start}: {} reachable edges, {} unreached",
        component_edges.len(),
        unreached_edge_ids.len()
    );

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let component_node_set: std::collections::HashSet<NodeId> =
        component_nodes.iter().copied().collect();
    let odd: Vec<NodeId> = global_odd
        .into_iter()
        .filter(|n| component_node_set.contains(n))
        .collect();
    log::trace!("{} odd-degree vertices in component", odd.len());

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let apsp = apsp_among(graph, &odd)?;

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let matching = min_weight_perfect_matching(&odd, |a, b| apsp.distance(a, b), config.k_exact)?;

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let duplicate_edge_ids = duplicated_edge_ids(&matching, &apsp);

    let augmented = augment(graph, &matching, &apsp);

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let circuit = hierholzer(&augmented, start);
    let total_distance: f64 = circuit
        .iter()
        .map(|t| graph.edge(t.edge).expect("circuit edge exists").length)
        .sum();
    let edge_order: Vec<EdgeId> = circuit.iter().map(|t| t.edge).collect();
    let path = build_path(&circuit, graph);

    if is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let instructions = instructions_for(&circuit, graph, config)
        .expect("a Hierholzer circuit over a non-empty graph is never empty and stays on-graph");

    Ok(RouteResult {
        start,
        edge_order,
        path,
        total_distance,
        original_distance,
        duplicate_edge_ids,
        unreached_edge_ids,
        instructions,
        estimated_time_ms: estimated_time_ms(total_distance, config),
    })
}

/// Edge ids duplicated by augmentation, as a set of distinct ids (§3: "the
/// multiset of ids occurring more than once in `edge_order`, represented as
/// a set of distinct ids"). An edge lying on two or more matched pairs'
/// shortest paths is still counted once.
fn duplicated_edge_ids(matching: &[(NodeId, NodeId)], apsp: &Apsp) -> Vec<EdgeId> {
    let mut ids = Vec::new();
    for &(a, b) in matching {
        ids.extend(apsp.path(a, b).edge_sequence);
    }
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Concatenates each traversal's geometry into one polyline, dropping the
/// leading point of every traversal after the first since it duplicates the
/// previous traversal's trailing point.
fn build_path(circuit: &[EdgeTraversal], graph: &Graph) -> Vec<Point> {
    let mut path = Vec::new();
    for (i, t) in circuit.iter().enumerate() {
        let edge = graph.edge(t.edge).expect("circuit edge exists");
        let geometry = edge.geometry_toward(t.to_node);
        if i == 0 {
            path.extend(geometry);
        } else {
            path.extend(geometry.into_iter().skip(1));
        }
    }
    path
}
