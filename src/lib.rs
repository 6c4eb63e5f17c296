//! Route Inspection (Chinese Postman) solver and turn-instruction generator
//! for street graphs derived from OpenStreetMap-style data.
//!
//! The crate is a pure library: no CLI, no wire protocol, no I/O. Callers
//! build a [`Graph`] from their own node/edge source, call [`solve`] to get
//! a [`RouteResult`] covering every edge at minimum extra distance, and read
//! `result.instructions` for the turn-by-turn narration.
//!
//! ```no_run
//! use everystreet_core::{config::SolverConfig, graph::{Edge, Graph, Node}, geo::Point, solve};
//!
//! let nodes = vec![
//!     (1, Node { location: Point::new(0.0, 0.0) }),
//!     (2, Node { location: Point::new(0.001, 0.0) }),
//! ];
//! let edges = vec![Edge {
//!     id: 1,
//!     from: 1,
//!     to: 2,
//!     length: 111.19,
//!     geometry: vec![Point::new(0.0, 0.0), Point::new(0.001, 0.0)],
//!     name: Some("Elm St".to_string()),
//! }];
//! let graph = Graph::build(nodes, edges).unwrap();
//! let result = solve(&graph, None, &SolverConfig::default(), || false).unwrap();
//! assert_eq!(result.edge_order, vec![1, 1]);
//! ```

pub mod augment;
pub mod config;
pub mod error;
pub mod eulerian;
pub mod geo;
pub mod graph;
pub mod instructions;
pub mod matching;
pub mod shortest_paths;
pub mod solver;

pub use config::SolverConfig;
pub use error::{InstructionError, SolveError};
pub use eulerian::EdgeTraversal;
pub use geo::Point;
pub use graph::{Edge, Graph, GraphError, Node};
pub use instructions::{instructions_for, Instruction, InstructionKind};
pub use solver::{solve, RouteResult};
