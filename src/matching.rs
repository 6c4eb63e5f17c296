//! Minimum-weight perfect matching over an even-sized vertex set.
//!
//! Odd-vertex counts are small for the target workload (neighbourhood-scale
//! street graphs), so exact branch-and-bound enumeration is used below
//! `K_exact` and a bounded greedy approximation above it (§4.D). Pruning and
//! tie-breaking follow the spec precisely: a partial matching is abandoned
//! as soon as its accumulated cost reaches the best complete matching found
//! so far, and among equal-cost matchings the first one enumeration visits
//! wins.

use std::collections::HashSet;

use itertools::Itertools;

use crate::error::SolveError;
use crate::graph::NodeId;

/// Computes a minimum-weight perfect matching over `vertices` using
/// `weight(a, b)` for pairwise cost.
pub fn min_weight_perfect_matching(
    vertices: &[NodeId],
    weight: impl Fn(NodeId, NodeId) -> f64,
    k_exact: usize,
) -> Result<Vec<(NodeId, NodeId)>, SolveError> {
    let k = vertices.len();
    if k % 2 != 0 {
        return Err(SolveError::OddCardinality(k));
    }
    if k == 0 {
        return Ok(Vec::new());
    }
    if k == 2 {
        return Ok(vec![(vertices[0], vertices[1])]);
    }
    if k <= k_exact {
        Ok(exact_matching(vertices, &weight))
    } else {
        Ok(greedy_matching(vertices, &weight))
    }
}

/// Exact branch-and-bound enumeration of all perfect matchings, `O(k!!)`
/// worst case. Fixes the lowest-indexed remaining vertex at each step and
/// tries each possible partner; prunes any partial matching whose
/// accumulated cost already meets or exceeds the best complete matching
/// found so far.
fn exact_matching(vertices: &[NodeId], weight: &impl Fn(NodeId, NodeId) -> f64) -> Vec<(NodeId, NodeId)> {
    let mut best_cost = f64::INFINITY;
    let mut best: Option<Vec<(NodeId, NodeId)>> = None;
    let mut current = Vec::with_capacity(vertices.len() / 2);
    log::trace!("exact matching over {} vertices", vertices.len());
    search(vertices, weight, 0.0, &mut current, &mut best_cost, &mut best);
    best.expect("a perfect matching always exists over a non-empty even-sized set")
}

fn search(
    remaining: &[NodeId],
    weight: &impl Fn(NodeId, NodeId) -> f64,
    cost_so_far: f64,
    current: &mut Vec<(NodeId, NodeId)>,
    best_cost: &mut f64,
    best: &mut Option<Vec<(NodeId, NodeId)>>,
) {
    if remaining.is_empty() {
        if cost_so_far < *best_cost {
            *best_cost = cost_so_far;
            *best = Some(current.clone());
        }
        return;
    }
    let v0 = remaining[0];
    let rest = &remaining[1..];
    for i in 0..rest.len() {
        let partner = rest[i];
        let pair_cost = weight(v0, partner);
        let new_cost = cost_so_far + pair_cost;
        if new_cost >= *best_cost {
            continue;
        }
        let mut next_remaining = Vec::with_capacity(rest.len() - 1);
        next_remaining.extend_from_slice(&rest[..i]);
        next_remaining.extend_from_slice(&rest[i + 1..]);
        current.push((v0, partner));
        search(&next_remaining, weight, new_cost, current, best_cost, best);
        current.pop();
    }
}

/// Greedy approximation: enumerate all `C(k, 2)` pairs, sort ascending by
/// weight, then commit each pair in order iff both endpoints remain
/// unmatched.
fn greedy_matching(vertices: &[NodeId], weight: &impl Fn(NodeId, NodeId) -> f64) -> Vec<(NodeId, NodeId)> {
    let mut pairs: Vec<(NodeId, NodeId, f64)> = vertices
        .iter()
        .copied()
        .tuple_combinations()
        .map(|(a, b)| (a, b, weight(a, b)))
        .collect();
    pairs.sort_by(|a, b| a.2.partial_cmp(&b.2).expect("weights are finite"));

    let mut matched: HashSet<NodeId> = HashSet::with_capacity(vertices.len());
    let mut matching = Vec::with_capacity(vertices.len() / 2);
    for (a, b, _) in pairs {
        if matched.len() == vertices.len() {
            break;
        }
        if !matched.contains(&a) && !matched.contains(&b) {
            matched.insert(a);
            matched.insert(b);
            matching.push((a, b));
        }
    }
    matching
}
