use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{GeoPoint, GreatCircle, Heuristic};
use crate::path::{
    find_route_a_star, find_route_bfs, find_route_dijkstra, SearchLimits, SearchOutcome,
};

/// Dense index of a node inside a [`RoadGraph`].
pub type NodeIndex = usize;

/// Directed road segment leaving a node.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    destination: GeoPoint,
    target: NodeIndex,
    road_name: String,
    road_type: String,
    length: f64,
}

impl RoadEdge {
    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    pub fn road_name(&self) -> &str {
        &self.road_name
    }

    pub fn road_type(&self) -> &str {
        &self.road_type
    }

    /// Segment length; never negative.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub(crate) fn target(&self) -> NodeIndex {
        self.target
    }
}

/// Intersection in the road network together with its outgoing segments.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    location: GeoPoint,
    edges: Vec<RoadEdge>,
}

impl RoadNode {
    fn new(location: GeoPoint) -> Self {
        Self {
            location,
            edges: Vec::new(),
        }
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Vertex/edge counts plus a per-road-type breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
    pub road_types: BTreeMap<String, usize>,
}

/// Directed road network keyed by intersection coordinate.
///
/// The graph only grows: vertices and edges can be added but never removed.
/// Once built it can be shared between threads and searched concurrently;
/// every search allocates its own working state.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    nodes: Vec<RoadNode>,
    index: HashMap<GeoPoint, NodeIndex>,
    num_edges: usize,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an intersection.
    ///
    /// Returns `false` without touching the graph when the location is
    /// already present or is not a finite coordinate.
    pub fn add_vertex(&mut self, location: GeoPoint) -> bool {
        if !location.is_valid() || self.index.contains_key(&location) {
            return false;
        }
        self.index.insert(location, self.nodes.len());
        self.nodes.push(RoadNode::new(location));
        true
    }

    /// Add a directed road segment `from -> to`.
    ///
    /// Both endpoints must already be vertices and `length` must be a finite,
    /// non-negative number. The reverse direction is not added.
    pub fn add_edge(
        &mut self,
        from: GeoPoint,
        to: GeoPoint,
        road_name: impl Into<String>,
        road_type: impl Into<String>,
        length: f64,
    ) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidEdge {
            from,
            to,
            reason: reason.to_string(),
        };

        if !length.is_finite() || length < 0.0 {
            return Err(invalid("length must be a finite, non-negative number"));
        }
        let source = self
            .index_of(&from)
            .ok_or_else(|| invalid("source is not a vertex of the graph"))?;
        let target = self
            .index_of(&to)
            .ok_or_else(|| invalid("destination is not a vertex of the graph"))?;

        self.nodes[source].edges.push(RoadEdge {
            destination: to,
            target,
            road_name: road_name.into(),
            road_type: road_type.into(),
            length,
        });
        self.num_edges += 1;
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of directed edges across all nodes.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Vertex coordinates in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.nodes.iter().map(|node| node.location)
    }

    pub fn contains(&self, location: &GeoPoint) -> bool {
        self.index.contains_key(location)
    }

    pub fn node(&self, location: &GeoPoint) -> Option<&RoadNode> {
        self.index_of(location).map(|index| &self.nodes[index])
    }

    /// Outgoing edges of `location`; empty for unknown locations.
    pub fn neighbours(&self, location: &GeoPoint) -> &[RoadEdge] {
        self.node(location).map(RoadNode::edges).unwrap_or(&[])
    }

    /// Shortest edge from `from` to `to`, if the two are directly connected.
    pub fn edge_between(&self, from: &GeoPoint, to: &GeoPoint) -> Option<&RoadEdge> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.destination == *to)
            .min_by(|a, b| a.length.total_cmp(&b.length))
    }

    /// Count vertices, edges and edges per road type.
    pub fn stats(&self) -> GraphStats {
        let mut road_types = BTreeMap::new();
        for edge in self.nodes.iter().flat_map(|node| node.edges.iter()) {
            *road_types.entry(edge.road_type.clone()).or_insert(0) += 1;
        }
        GraphStats {
            vertices: self.num_vertices(),
            edges: self.num_edges(),
            road_types,
        }
    }

    /// Fewest-hop route from `start` to `goal`, both included.
    ///
    /// `Ok(None)` means the goal is unreachable; an unknown `start` is an error.
    pub fn bfs(&self, start: GeoPoint, goal: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        self.bfs_with_visitor(start, goal, |_| {})
    }

    /// [`RoadGraph::bfs`] calling `visit` for every node taken off the frontier.
    pub fn bfs_with_visitor<V>(
        &self,
        start: GeoPoint,
        goal: GeoPoint,
        mut visit: V,
    ) -> Result<Option<Vec<GeoPoint>>>
    where
        V: FnMut(&GeoPoint),
    {
        find_route_bfs(self, start, goal, &SearchLimits::default(), &mut visit)
            .map(SearchOutcome::into_path)
    }

    /// Lowest total length route from `start` to `goal` using Dijkstra's algorithm.
    pub fn dijkstra(&self, start: GeoPoint, goal: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        self.dijkstra_with_visitor(start, goal, |_| {})
    }

    /// [`RoadGraph::dijkstra`] calling `visit` for every settled node.
    pub fn dijkstra_with_visitor<V>(
        &self,
        start: GeoPoint,
        goal: GeoPoint,
        mut visit: V,
    ) -> Result<Option<Vec<GeoPoint>>>
    where
        V: FnMut(&GeoPoint),
    {
        find_route_dijkstra(self, start, goal, &SearchLimits::default(), &mut visit)
            .map(SearchOutcome::into_path)
    }

    /// Lowest total length route using A* guided by great-circle distance.
    ///
    /// The estimate is in kilometres, which matches maps built by
    /// [`crate::load_road_map`]. For graphs whose edge lengths are in
    /// coordinate units the estimate overshoots and the route may be longer
    /// than the one [`RoadGraph::dijkstra`] finds; use
    /// [`RoadGraph::a_star_search_with`] with [`crate::Euclidean`] there.
    pub fn a_star_search(&self, start: GeoPoint, goal: GeoPoint) -> Result<Option<Vec<GeoPoint>>> {
        self.a_star_search_with(start, goal, &GreatCircle, |_| {})
    }

    /// A* with a caller-supplied heuristic and visitor.
    pub fn a_star_search_with<H, V>(
        &self,
        start: GeoPoint,
        goal: GeoPoint,
        heuristic: &H,
        mut visit: V,
    ) -> Result<Option<Vec<GeoPoint>>>
    where
        H: Heuristic + ?Sized,
        V: FnMut(&GeoPoint),
    {
        find_route_a_star(
            self,
            start,
            goal,
            heuristic,
            &SearchLimits::default(),
            &mut visit,
        )
        .map(SearchOutcome::into_path)
    }

    pub(crate) fn index_of(&self, location: &GeoPoint) -> Option<NodeIndex> {
        self.index.get(location).copied()
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &RoadNode {
        &self.nodes[index]
    }

    /// Resolve the start of a search, failing fast when it is not a vertex.
    pub(crate) fn require_index(&self, location: GeoPoint) -> Result<NodeIndex> {
        self.index_of(&location).ok_or_else(|| {
            debug!(%location, "search requested from unknown location");
            Error::UnknownLocation { location }
        })
    }
}
