use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{GeoPoint, Heuristic};
use crate::graph::{NodeIndex, RoadGraph};

/// Limits applied to a single search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after expanding this many nodes and report no path.
    pub max_expansions: Option<usize>,
}

/// Result of a search together with bookkeeping about the exploration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Route from start to goal (both included), or `None` when no path was found.
    pub path: Option<Vec<GeoPoint>>,
    /// Number of nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// `true` when the search gave up because of [`SearchLimits::max_expansions`].
    pub truncated: bool,
}

impl SearchOutcome {
    pub fn into_path(self) -> Option<Vec<GeoPoint>> {
        self.path
    }

    fn unreachable() -> Self {
        Self {
            path: None,
            expanded: 0,
            truncated: false,
        }
    }
}

/// Per-call working state shared by all three searches.
///
/// Nodes are addressed by their dense graph index, so parent links are a
/// plain vector rather than a coordinate map.
struct SearchState<'g> {
    graph: &'g RoadGraph,
    start: NodeIndex,
    goal: NodeIndex,
    parents: Vec<Option<NodeIndex>>,
    expanded: usize,
    limits: SearchLimits,
}

impl<'g> SearchState<'g> {
    fn new(graph: &'g RoadGraph, start: NodeIndex, goal: NodeIndex, limits: &SearchLimits) -> Self {
        Self {
            graph,
            start,
            goal,
            parents: vec![None; graph.num_vertices()],
            expanded: 0,
            limits: *limits,
        }
    }

    fn limit_reached(&self) -> bool {
        self.limits
            .max_expansions
            .is_some_and(|limit| self.expanded >= limit)
    }

    /// Record the expansion of `node` and notify the visitor.
    fn expand(&mut self, node: NodeIndex, visit: &mut dyn FnMut(&GeoPoint)) {
        self.expanded += 1;
        visit(&self.graph.node_at(node).location());
    }

    fn found(self) -> SearchOutcome {
        let path = reconstruct_path(self.graph, &self.parents, self.start, self.goal);
        debug!(
            expanded = self.expanded,
            hops = path.len().saturating_sub(1),
            "search reached goal"
        );
        SearchOutcome {
            path: Some(path),
            expanded: self.expanded,
            truncated: false,
        }
    }

    fn exhausted(self) -> SearchOutcome {
        debug!(expanded = self.expanded, "frontier exhausted without reaching goal");
        SearchOutcome {
            path: None,
            expanded: self.expanded,
            truncated: false,
        }
    }

    fn truncated(self) -> SearchOutcome {
        warn!(
            expanded = self.expanded,
            limit = ?self.limits.max_expansions,
            "search stopped at expansion limit"
        );
        SearchOutcome {
            path: None,
            expanded: self.expanded,
            truncated: true,
        }
    }
}

/// Resolve the endpoints of a search. An unknown goal can never be reached,
/// so it short-circuits to `None`.
fn endpoints(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
) -> Result<Option<(NodeIndex, NodeIndex)>> {
    let start_index = graph.require_index(start)?;
    let Some(goal_index) = graph.index_of(&goal) else {
        debug!(%goal, "goal is not a vertex of the graph");
        return Ok(None);
    };
    Ok(Some((start_index, goal_index)))
}

/// Run breadth-first search from `start` to `goal`.
///
/// Nodes are marked visited when they are queued, so each node enters the
/// frontier at most once. Edges are followed in insertion order, which makes
/// the choice between equally short routes deterministic.
pub fn find_route_bfs(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    limits: &SearchLimits,
    visit: &mut dyn FnMut(&GeoPoint),
) -> Result<SearchOutcome> {
    let Some((start_index, goal_index)) = endpoints(graph, start, goal)? else {
        return Ok(SearchOutcome::unreachable());
    };

    let mut state = SearchState::new(graph, start_index, goal_index, limits);
    let mut visited = vec![false; graph.num_vertices()];
    let mut queue = VecDeque::new();

    visited[start_index] = true;
    queue.push_back(start_index);

    while let Some(current) = queue.pop_front() {
        if state.limit_reached() {
            return Ok(state.truncated());
        }
        state.expand(current, visit);

        if current == goal_index {
            return Ok(state.found());
        }

        for edge in graph.node_at(current).edges() {
            let next = edge.target();
            if visited[next] {
                continue;
            }
            visited[next] = true;
            state.parents[next] = Some(current);
            queue.push_back(next);
        }
    }

    Ok(state.exhausted())
}

/// Run Dijkstra's algorithm to find the route with the lowest total length.
pub fn find_route_dijkstra(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    limits: &SearchLimits,
    visit: &mut dyn FnMut(&GeoPoint),
) -> Result<SearchOutcome> {
    let Some((start_index, goal_index)) = endpoints(graph, start, goal)? else {
        return Ok(SearchOutcome::unreachable());
    };
    let state = SearchState::new(graph, start_index, goal_index, limits);
    Ok(best_first(state, visit, |_| 0.0))
}

/// Run A* search, ordering the frontier by `g + h` where `h` is the
/// heuristic's estimate of the distance left to the goal.
pub fn find_route_a_star<H>(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    heuristic: &H,
    limits: &SearchLimits,
    visit: &mut dyn FnMut(&GeoPoint),
) -> Result<SearchOutcome>
where
    H: Heuristic + ?Sized,
{
    let Some((start_index, goal_index)) = endpoints(graph, start, goal)? else {
        return Ok(SearchOutcome::unreachable());
    };
    let state = SearchState::new(graph, start_index, goal_index, limits);
    Ok(best_first(state, visit, |node| {
        heuristic.estimate(&graph.node_at(node).location(), &goal)
    }))
}

/// Shared settle/relax loop for Dijkstra (`estimate == 0`) and A*.
///
/// Improved distances are pushed as new heap entries instead of updating
/// existing ones; entries for nodes that are already settled are stale and
/// skipped when popped.
fn best_first<E>(
    mut state: SearchState<'_>,
    visit: &mut dyn FnMut(&GeoPoint),
    estimate: E,
) -> SearchOutcome
where
    E: Fn(NodeIndex) -> f64,
{
    let graph = state.graph;
    let node_count = graph.num_vertices();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut settled = vec![false; node_count];
    let mut queue = Frontier::default();

    distances[state.start] = 0.0;
    queue.push(state.start, 0.0, estimate(state.start));

    while let Some(entry) = queue.pop() {
        if settled[entry.node] {
            continue;
        }
        if state.limit_reached() {
            return state.truncated();
        }

        settled[entry.node] = true;
        state.expand(entry.node, visit);

        if entry.node == state.goal {
            return state.found();
        }

        for edge in graph.node_at(entry.node).edges() {
            let next = edge.target();
            if settled[next] {
                continue;
            }

            let candidate = entry.cost + edge.length();
            if candidate < distances[next] {
                distances[next] = candidate;
                state.parents[next] = Some(entry.node);
                queue.push(next, candidate, candidate + estimate(next));
            }
        }
    }

    state.exhausted()
}

/// Walk parent links back from `goal` to `start` and return the route in
/// travel order.
fn reconstruct_path(
    graph: &RoadGraph,
    parents: &[Option<NodeIndex>],
    start: NodeIndex,
    goal: NodeIndex,
) -> Vec<GeoPoint> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        path.push(graph.node_at(index).location());
        if index == start {
            break;
        }
        current = parents[index];
    }
    path.reverse();
    path
}

/// Min-priority queue that pops equal priorities in insertion order.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    sequence: u64,
}

impl Frontier {
    fn push(&mut self, node: NodeIndex, cost: f64, priority: f64) {
        self.heap.push(FrontierEntry {
            node,
            cost,
            priority: FloatOrd(priority),
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug)]
struct FrontierEntry {
    node: NodeIndex,
    /// Distance travelled from the start.
    cost: f64,
    /// Ordering key: `cost` for Dijkstra, `cost + estimate` for A*.
    priority: FloatOrd,
    sequence: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority, and
        // the earlier push wins a tie.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
