//! Route planning on top of the raw path searches.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (BFS, Dijkstra, A*)
//! - [`HeuristicKind`] - Distance estimate used by A*
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is encapsulated in its own [`RoutePlanner`] implementation,
//! selected per request by [`select_planner`].
//!
//! # Example
//!
//! ```ignore
//! use roadgraph_lib::{load_road_map, plan_route, GeoPoint, RouteRequest};
//!
//! let graph = load_road_map("data/simpletest.map")?;
//! let request = RouteRequest::dijkstra(GeoPoint::new(1.0, 1.0), GeoPoint::new(8.0, -1.0));
//! let plan = plan_route(&graph, &request)?;
//! println!("Route: {} hops, {:.3} km", plan.hop_count(), plan.total_length);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::GeoPoint;
use crate::graph::RoadGraph;
use crate::path::SearchLimits;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest road segments).
    Bfs,
    /// Dijkstra's algorithm (shortest total length).
    Dijkstra,
    /// A* search (heuristic guided, shortest total length).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            other => Err(format!(
                "unknown algorithm '{other}'; expected bfs, dijkstra or a-star"
            )),
        }
    }
}

/// Distance estimate used to guide A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    /// Great-circle distance in kilometres (matches loaded road maps).
    #[default]
    GreatCircle,
    /// Planar distance on raw coordinates.
    Euclidean,
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            HeuristicKind::GreatCircle => "great-circle",
            HeuristicKind::Euclidean => "euclidean",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub goal: GeoPoint,
    pub algorithm: RouteAlgorithm,
    pub heuristic: HeuristicKind,
    /// Give up after expanding this many nodes.
    pub max_expansions: Option<usize>,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, goal: GeoPoint, algorithm: RouteAlgorithm) -> Self {
        Self {
            start,
            goal,
            algorithm,
            heuristic: HeuristicKind::default(),
            max_expansions: None,
        }
    }

    /// Convenience constructor for BFS routes.
    pub fn bfs(start: GeoPoint, goal: GeoPoint) -> Self {
        Self::new(start, goal, RouteAlgorithm::Bfs)
    }

    /// Convenience constructor for Dijkstra routes.
    pub fn dijkstra(start: GeoPoint, goal: GeoPoint) -> Self {
        Self::new(start, goal, RouteAlgorithm::Dijkstra)
    }

    /// Convenience constructor for A* routes using the default heuristic.
    pub fn a_star(start: GeoPoint, goal: GeoPoint) -> Self {
        Self::new(start, goal, RouteAlgorithm::AStar)
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: GeoPoint,
    pub goal: GeoPoint,
    pub steps: Vec<GeoPoint>,
    /// Sum of the lengths of the edges along `steps`.
    pub total_length: f64,
    /// Nodes expanded while searching.
    pub expanded: usize,
}

impl RoutePlan {
    /// Number of road segments in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Plan a route through `graph` according to `request`.
///
/// Unlike the raw searches, an unreachable goal is reported as
/// [`Error::RouteNotFound`].
pub fn plan_route(graph: &RoadGraph, request: &RouteRequest) -> Result<RoutePlan> {
    let planner = select_planner(request);
    let outcome = planner.find_path(graph, request.start, request.goal, &request.limits())?;

    let Some(steps) = outcome.path else {
        return Err(Error::RouteNotFound {
            start: request.start,
            goal: request.goal,
        });
    };

    let total_length = route_length(graph, &steps);
    debug!(
        algorithm = %planner.algorithm(),
        hops = steps.len().saturating_sub(1),
        total_length,
        expanded = outcome.expanded,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start: request.start,
        goal: request.goal,
        steps,
        total_length,
        expanded: outcome.expanded,
    })
}

/// Sum the shortest edge between each consecutive pair of steps.
fn route_length(graph: &RoadGraph, steps: &[GeoPoint]) -> f64 {
    steps
        .windows(2)
        .filter_map(|pair| graph.edge_between(&pair[0], &pair[1]))
        .map(|edge| edge.length())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_display() {
        for algorithm in [
            RouteAlgorithm::Bfs,
            RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar,
        ] {
            let parsed: RouteAlgorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
        assert_eq!("AStar".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert!("greedy".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn algorithm_serialises_like_display() {
        let json = serde_json::to_string(&RouteAlgorithm::AStar).unwrap();
        assert_eq!(json, "\"a-star\"");
        let json = serde_json::to_string(&HeuristicKind::GreatCircle).unwrap();
        assert_eq!(json, "\"great-circle\"");
    }

    #[test]
    fn request_builders_set_fields() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 1.0);
        let request = RouteRequest::a_star(a, b)
            .with_heuristic(HeuristicKind::Euclidean)
            .with_max_expansions(10);
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);
        assert_eq!(request.heuristic, HeuristicKind::Euclidean);
        assert_eq!(request.limits().max_expansions, Some(10));
    }
}
