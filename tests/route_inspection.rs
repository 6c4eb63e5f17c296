//! End-to-end scenarios for the full solve → instructions pipeline, one per
//! concrete case this crate's testable properties are defined against.

use everystreet_core::geo::distance;
use everystreet_core::graph::{Edge, Graph, Node};
use everystreet_core::instructions::InstructionKind;
use everystreet_core::{solve, Point, SolverConfig};

fn node(id: u64, lat: f64, lng: f64) -> (u64, Node) {
    (
        id,
        Node {
            location: Point::new(lat, lng),
        },
    )
}

fn straight_edge(id: u64, from: u64, to: u64, a: Point, b: Point, name: Option<&str>) -> Edge {
    Edge {
        id,
        from,
        to,
        length: distance(a, b),
        geometry: vec![a, b],
        name: name.map(str::to_owned),
    }
}

fn never_cancelled() -> bool {
    false
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn route_result_round_trips_through_json() {
    init_logging();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.001, 0.0);
    let g = Graph::build(
        vec![node(1, a.lat, a.lng), node(2, b.lat, b.lng)],
        vec![straight_edge(1, 1, 2, a, b, Some("Elm St"))],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let round_tripped: everystreet_core::RouteResult = serde_json::from_str(&json).unwrap();

    assert_eq!(round_tripped.edge_order, result.edge_order);
    assert_eq!(round_tripped.instructions.len(), result.instructions.len());
}

#[test]
fn single_edge_round_trip() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.001, 0.0);
    let g = Graph::build(
        vec![node(1, a.lat, a.lng), node(2, b.lat, b.lng)],
        vec![straight_edge(1, 1, 2, a, b, None)],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    assert_eq!(result.edge_order, vec![1, 1]);
    assert!((result.total_distance - 222.38).abs() < 0.1, "got {}", result.total_distance);
    assert_eq!(result.instructions.first().unwrap().kind, InstructionKind::Start);
    assert_eq!(result.instructions.last().unwrap().kind, InstructionKind::Arrived);
}

#[test]
fn equilateral_triangle_is_already_eulerian() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.0009, 0.0);
    let c = Point::new(0.00045, 0.00078);
    let g = Graph::build(
        vec![node(1, a.lat, a.lng), node(2, b.lat, b.lng), node(3, c.lat, c.lng)],
        vec![
            Edge { id: 1, from: 1, to: 2, length: 100.0, geometry: vec![a, b], name: Some("A St".into()) },
            Edge { id: 2, from: 2, to: 3, length: 100.0, geometry: vec![b, c], name: Some("A St".into()) },
            Edge { id: 3, from: 3, to: 1, length: 100.0, geometry: vec![c, a], name: Some("A St".into()) },
        ],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    assert_eq!(result.total_distance, 300.0);
    assert_eq!(result.original_distance, 300.0);
    assert_eq!(result.edge_order.len(), 3);
    let mut ids = result.edge_order.clone();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn square_with_diagonal_duplicates_the_diagonal() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(0.001, 0.0),
        Point::new(0.001, 0.001),
        Point::new(0.0, 0.001),
    ];
    let g = Graph::build(
        vec![
            node(1, pts[0].lat, pts[0].lng),
            node(2, pts[1].lat, pts[1].lng),
            node(3, pts[2].lat, pts[2].lng),
            node(4, pts[3].lat, pts[3].lng),
        ],
        vec![
            Edge { id: 1, from: 1, to: 2, length: 100.0, geometry: vec![pts[0], pts[1]], name: None },
            Edge { id: 2, from: 2, to: 3, length: 100.0, geometry: vec![pts[1], pts[2]], name: None },
            Edge { id: 3, from: 3, to: 4, length: 100.0, geometry: vec![pts[2], pts[3]], name: None },
            Edge { id: 4, from: 4, to: 1, length: 100.0, geometry: vec![pts[3], pts[0]], name: None },
            Edge { id: 5, from: 1, to: 3, length: 100.0, geometry: vec![pts[0], pts[2]], name: None },
        ],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    assert_eq!(result.total_distance, 600.0);
    assert_eq!(result.edge_order.len(), 6);
    assert_eq!(result.edge_order.iter().filter(|&&e| e == 5).count(), 2);
    assert_eq!(result.duplicate_edge_ids, vec![5]);
}

#[test]
fn two_disjoint_triangles_restrict_to_the_start_component() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.0009, 0.0);
    let c = Point::new(0.00045, 0.00078);
    let d = Point::new(1.0, 0.0);
    let e = Point::new(1.0009, 0.0);
    let f = Point::new(1.00045, 0.00078);
    let g = Graph::build(
        vec![
            node(1, a.lat, a.lng),
            node(2, b.lat, b.lng),
            node(3, c.lat, c.lng),
            node(4, d.lat, d.lng),
            node(5, e.lat, e.lng),
            node(6, f.lat, f.lng),
        ],
        vec![
            Edge { id: 1, from: 1, to: 2, length: 100.0, geometry: vec![a, b], name: None },
            Edge { id: 2, from: 2, to: 3, length: 100.0, geometry: vec![b, c], name: None },
            Edge { id: 3, from: 3, to: 1, length: 100.0, geometry: vec![c, a], name: None },
            Edge { id: 4, from: 4, to: 5, length: 100.0, geometry: vec![d, e], name: None },
            Edge { id: 5, from: 5, to: 6, length: 100.0, geometry: vec![e, f], name: None },
            Edge { id: 6, from: 6, to: 4, length: 100.0, geometry: vec![f, d], name: None },
        ],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    let mut ids = result.edge_order.clone();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(result.unreached_edge_ids, vec![4, 5, 6]);
}

#[test]
fn straight_collinear_chain_has_no_turn_instructions() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(0.001, 0.0),
        Point::new(0.002, 0.0),
        Point::new(0.003, 0.0),
    ];
    let g = Graph::build(
        vec![
            node(1, pts[0].lat, pts[0].lng),
            node(2, pts[1].lat, pts[1].lng),
            node(3, pts[2].lat, pts[2].lng),
            node(4, pts[3].lat, pts[3].lng),
        ],
        vec![
            straight_edge(1, 1, 2, pts[0], pts[1], Some("Main St")),
            straight_edge(2, 2, 3, pts[1], pts[2], Some("Main St")),
            straight_edge(3, 3, 4, pts[2], pts[3], Some("Main St")),
        ],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    assert_eq!(result.instructions.len(), 2);
    assert_eq!(result.instructions[0].kind, InstructionKind::Start);
    assert_eq!(result.instructions[1].kind, InstructionKind::Arrived);
    let expected_total: f64 = g.edges().map(|e| e.length).sum();
    assert!((result.total_distance - expected_total).abs() < 1e-9);
}

#[test]
fn t_junction_emits_one_turn_and_one_street_name_change() {
    // Two collinear segments on "Main St", then a 90-degree turn onto "Oak Ave".
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(0.001, 0.0),
        Point::new(0.002, 0.0),
        Point::new(0.002, 0.001),
    ];
    let g = Graph::build(
        vec![
            node(1, pts[0].lat, pts[0].lng),
            node(2, pts[1].lat, pts[1].lng),
            node(3, pts[2].lat, pts[2].lng),
            node(4, pts[3].lat, pts[3].lng),
        ],
        vec![
            straight_edge(1, 1, 2, pts[0], pts[1], Some("Main St")),
            straight_edge(2, 2, 3, pts[1], pts[2], Some("Main St")),
            straight_edge(3, 3, 4, pts[2], pts[3], Some("Oak Ave")),
        ],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    let turns: Vec<_> = result
        .instructions
        .iter()
        .filter(|i| matches!(i.kind, InstructionKind::TurnLeft | InstructionKind::TurnRight))
        .collect();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].street_name.as_deref(), Some("Oak Ave"));

    let name_changes = result
        .instructions
        .iter()
        .filter(|i| i.street_name.as_deref() == Some("Oak Ave"))
        .count();
    assert_eq!(name_changes, 1);
}

#[test]
fn universal_properties_hold_on_a_representative_graph() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(0.001, 0.0),
        Point::new(0.001, 0.001),
        Point::new(0.0, 0.001),
    ];
    let g = Graph::build(
        vec![
            node(1, pts[0].lat, pts[0].lng),
            node(2, pts[1].lat, pts[1].lng),
            node(3, pts[2].lat, pts[2].lng),
            node(4, pts[3].lat, pts[3].lng),
        ],
        vec![
            straight_edge(1, 1, 2, pts[0], pts[1], Some("A")),
            straight_edge(2, 2, 3, pts[1], pts[2], Some("B")),
            straight_edge(3, 3, 4, pts[2], pts[3], Some("C")),
            straight_edge(4, 4, 1, pts[3], pts[0], Some("D")),
            straight_edge(5, 1, 3, pts[0], pts[2], Some("E")),
        ],
    )
    .unwrap();

    let result = solve(&g, Some(1), &SolverConfig::default(), never_cancelled).unwrap();

    let mut covered: Vec<_> = result.edge_order.clone();
    covered.sort_unstable();
    covered.dedup();
    let mut all_ids: Vec<_> = g.edges().map(|e| e.id).collect();
    all_ids.sort_unstable();
    assert_eq!(covered, all_ids);

    assert!(result.total_distance >= result.original_distance);

    assert_eq!(result.edge_order[0], *result.edge_order.first().unwrap());
    assert!(result.instructions.len() >= 2);
    assert_eq!(result.instructions.first().unwrap().kind, InstructionKind::Start);
    assert_eq!(result.instructions.last().unwrap().kind, InstructionKind::Arrived);
    for instruction in &result.instructions {
        assert!((0.0..360.0).contains(&instruction.bearing));
        assert!(instruction.distance >= 0.0);
        if let Some(name) = &instruction.street_name {
            assert!(!name.is_empty());
        }
    }

    let path_length: f64 = result
        .path
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum();
    let relative_error = (path_length - result.total_distance).abs() / result.total_distance;
    assert!(relative_error < 1e-6, "relative error {relative_error}");
}
