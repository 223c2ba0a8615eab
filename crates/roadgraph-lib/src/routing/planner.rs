//! Route planning strategies.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! routing algorithm, so `plan_route` never has to match on the algorithm
//! itself.

use crate::error::Result;
use crate::geometry::{Euclidean, GeoPoint, GreatCircle};
use crate::graph::RoadGraph;
use crate::path::{
    find_route_a_star, find_route_bfs, find_route_dijkstra, SearchLimits, SearchOutcome,
};

use super::{HeuristicKind, RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// An unreachable goal yields an outcome without a path; only an unknown
    /// start is an error.
    fn find_path(
        &self,
        graph: &RoadGraph,
        start: GeoPoint,
        goal: GeoPoint,
        limits: &SearchLimits,
    ) -> Result<SearchOutcome>;
}

/// Breadth-first search planner.
///
/// Finds the route with the fewest road segments, ignoring their lengths.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &RoadGraph,
        start: GeoPoint,
        goal: GeoPoint,
        limits: &SearchLimits,
    ) -> Result<SearchOutcome> {
        find_route_bfs(graph, start, goal, limits, &mut |_| {})
    }
}

/// Dijkstra planner minimising the total road length.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &RoadGraph,
        start: GeoPoint,
        goal: GeoPoint,
        limits: &SearchLimits,
    ) -> Result<SearchOutcome> {
        find_route_dijkstra(graph, start, goal, limits, &mut |_| {})
    }
}

/// A* planner minimising the total road length.
///
/// The heuristic has to be in the same unit as the edge lengths for the
/// result to be optimal: great-circle kilometres for loaded road maps,
/// Euclidean for graphs built on plain coordinates.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    heuristic: HeuristicKind,
}

impl AStarPlanner {
    pub fn new(heuristic: HeuristicKind) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic
    }
}

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &RoadGraph,
        start: GeoPoint,
        goal: GeoPoint,
        limits: &SearchLimits,
    ) -> Result<SearchOutcome> {
        match self.heuristic {
            HeuristicKind::GreatCircle => {
                find_route_a_star(graph, start, goal, &GreatCircle, limits, &mut |_| {})
            }
            HeuristicKind::Euclidean => {
                find_route_a_star(graph, start, goal, &Euclidean, limits, &mut |_| {})
            }
        }
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::new(request.heuristic)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(algorithm: RouteAlgorithm) -> RouteRequest {
        RouteRequest::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0), algorithm)
    }

    #[test]
    fn bfs_planner_returns_correct_algorithm() {
        assert_eq!(BfsPlanner.algorithm(), RouteAlgorithm::Bfs);
    }

    #[test]
    fn dijkstra_planner_returns_correct_algorithm() {
        assert_eq!(DijkstraPlanner.algorithm(), RouteAlgorithm::Dijkstra);
    }

    #[test]
    fn astar_planner_defaults_to_great_circle() {
        let planner = AStarPlanner::default();
        assert_eq!(planner.algorithm(), RouteAlgorithm::AStar);
        assert_eq!(planner.heuristic(), HeuristicKind::GreatCircle);
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        for algorithm in [
            RouteAlgorithm::Bfs,
            RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar,
        ] {
            assert_eq!(select_planner(&request(algorithm)).algorithm(), algorithm);
        }
    }
}
