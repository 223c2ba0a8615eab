//! Route command handler for computing paths between two intersections.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use roadgraph_cli::output::{write_route, OutputFormat};
use roadgraph_lib::{
    load_road_map, plan_route, GeoPoint, HeuristicKind, RouteAlgorithm, RouteRequest,
    RouteSummary,
};

/// Algorithm names accepted by `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Bfs,
    Dijkstra,
    #[value(name = "a-star", alias = "astar")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Bfs => RouteAlgorithm::Bfs,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Heuristic names accepted by `--heuristic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    GreatCircle,
    Euclidean,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(value: HeuristicArg) -> Self {
        match value {
            HeuristicArg::GreatCircle => HeuristicKind::GreatCircle,
            HeuristicArg::Euclidean => HeuristicKind::Euclidean,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting intersection.
    pub from: GeoPoint,
    /// Destination intersection.
    pub to: GeoPoint,
    /// Algorithm to use when planning the route.
    pub algorithm: AlgorithmArg,
    /// Distance estimate for A*.
    pub heuristic: HeuristicArg,
    /// Give up after expanding this many intersections.
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(self.from, self.to, self.algorithm.into())
            .with_heuristic(self.heuristic.into());
        match self.max_expansions {
            Some(limit) => request.with_max_expansions(limit),
            None => request,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    map: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let graph = load_road_map(map)
        .with_context(|| format!("failed to load road map from {}", map.display()))?;

    let request = args.to_request();
    let plan = plan_route(&graph, &request)?;
    info!(
        algorithm = %plan.algorithm,
        hops = plan.hop_count(),
        expanded = plan.expanded,
        "route planned"
    );

    let summary = RouteSummary::from_plan(&graph, &plan)?;
    write_route(&mut io::stdout().lock(), &summary, format).context("failed to write route")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_convert_to_request() {
        let args = RouteCommandArgs {
            from: GeoPoint::new(1.0, 1.0),
            to: GeoPoint::new(2.0, 2.0),
            algorithm: AlgorithmArg::AStar,
            heuristic: HeuristicArg::Euclidean,
            max_expansions: Some(5),
        };
        let request = args.to_request();
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);
        assert_eq!(request.heuristic, HeuristicKind::Euclidean);
        assert_eq!(request.max_expansions, Some(5));
    }
}
