//! Converts an Eulerian edge-traversal sequence into turn-by-turn
//! directives, using bearing analysis and street-name change detection
//! (§4.H).

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::InstructionError;
use crate::eulerian::EdgeTraversal;
use crate::geo::{self, Point};
use crate::graph::Graph;

/// The kind of maneuver a turn instruction describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    Start,
    Continue,
    SlightLeft,
    SlightRight,
    TurnLeft,
    TurnRight,
    SharpLeft,
    SharpRight,
    UTurn,
    Arrived,
}

/// One turn-by-turn directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub street_name: Option<String>,
    /// Meters; see §3's `Instruction` for the exact per-`kind` meaning.
    pub distance: f64,
    pub location: Point,
    /// Heading after the directive, degrees clockwise from north, `[0, 360)`.
    pub bearing: f64,
}

/// Classifies a bearing change `delta` (already normalised to `(-180, 180]`)
/// into a maneuver kind. Positive is right, negative is left.
fn classify(delta: f64) -> InstructionKind {
    use InstructionKind::*;
    let magnitude = delta.abs();
    let right = delta > 0.0;
    if magnitude < 15.0 {
        Continue
    } else if magnitude < 45.0 {
        if right {
            SlightRight
        } else {
            SlightLeft
        }
    } else if magnitude < 120.0 {
        if right {
            TurnRight
        } else {
            TurnLeft
        }
    } else if magnitude < 160.0 {
        if right {
            SharpRight
        } else {
            SharpLeft
        }
    } else {
        UTurn
    }
}

/// Builds the instruction list for `circuit` over `graph`.
///
/// The out-of-cur bearing is taken from the last geometry segment of the
/// current edge in the direction of travel, and the into-nxt bearing from
/// the first geometry segment of the next edge — the choice the open
/// question in §9 leaves to the implementer (see `SPEC_FULL.md` §11).
pub fn instructions_for(
    circuit: &[EdgeTraversal],
    graph: &Graph,
    config: &SolverConfig,
) -> Result<Vec<Instruction>, InstructionError> {
    let first = circuit.first().ok_or(InstructionError::EmptyCircuit)?;
    let node_location = |id| {
        graph
            .node(id)
            .map(|n| n.location)
            .ok_or(InstructionError::MissingNode(id))
    };
    let edge_of = |t: &EdgeTraversal| {
        graph
            .edge(t.edge)
            .expect("every circuit edge id exists in the graph it was derived from")
    };

    let mut instructions = Vec::with_capacity(circuit.len() + 1);

    let first_edge = edge_of(first);
    let first_geometry = first_edge.geometry_toward(first.to_node);
    instructions.push(Instruction {
        kind: InstructionKind::Start,
        street_name: first_edge.name.clone(),
        distance: first_edge.length,
        location: node_location(first.from_node)?,
        bearing: geo::bearing(first_geometry[0], first_geometry[1]),
    });

    let mut acc = 0.0;
    for pair in circuit.windows(2) {
        let (cur, nxt) = (&pair[0], &pair[1]);
        let cur_edge = edge_of(cur);
        let nxt_edge = edge_of(nxt);
        acc += cur_edge.length;

        let cur_geometry = cur_edge.geometry_toward(cur.to_node);
        let nxt_geometry = nxt_edge.geometry_toward(nxt.to_node);
        let bearing_out = geo::bearing(
            cur_geometry[cur_geometry.len() - 2],
            cur_geometry[cur_geometry.len() - 1],
        );
        let bearing_in = geo::bearing(nxt_geometry[0], nxt_geometry[1]);
        let delta = geo::normalise_angle(bearing_in - bearing_out);
        let classification = classify(delta);
        let street_changed = cur_edge.name != nxt_edge.name && nxt_edge.name.is_some();

        if (classification != InstructionKind::Continue || street_changed)
            && acc >= config.min_turn_distance_m
        {
            instructions.push(Instruction {
                kind: classification,
                street_name: nxt_edge.name.clone(),
                distance: acc,
                location: node_location(cur.to_node)?,
                bearing: bearing_in,
            });
            acc = 0.0;
        }
    }

    // The scan above only folds in the length of every edge that precedes
    // a *following* traversal, which leaves out the final edge of the
    // circuit — add it now so ARRIVED's distance is the true residual
    // distance since the last emitted instruction, not zero.
    let last = circuit.last().expect("circuit is non-empty");
    acc += edge_of(last).length;
    instructions.push(Instruction {
        kind: InstructionKind::Arrived,
        street_name: None,
        distance: acc,
        location: node_location(last.to_node)?,
        bearing: 0.0,
    });

    Ok(instructions)
}
