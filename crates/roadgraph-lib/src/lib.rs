//! Road network library entry points.
//!
//! This crate models a road map as a directed graph of intersections keyed by
//! coordinate, loads such graphs from the plain-text road map format, and
//! finds routes with breadth-first search, Dijkstra's algorithm or A*.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geometry;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod routing;

pub use error::{Error, Result};
pub use geometry::{Euclidean, GeoPoint, GreatCircle, Heuristic};
pub use graph::{GraphStats, RoadEdge, RoadGraph, RoadNode};
pub use loader::{load_road_map, parse_road_map};
pub use output::{RouteRenderMode, RouteStep, RouteSummary};
pub use path::{find_route_a_star, find_route_bfs, find_route_dijkstra, SearchLimits, SearchOutcome};
pub use routing::{plan_route, HeuristicKind, RouteAlgorithm, RoutePlan, RouteRequest};
