use roadgraph_lib::{Error, Euclidean, GeoPoint, RoadGraph};

const A: GeoPoint = GeoPoint::new(0.0, 0.0);
const B: GeoPoint = GeoPoint::new(1.0, 0.0);
const C: GeoPoint = GeoPoint::new(2.0, 0.0);
const D: GeoPoint = GeoPoint::new(0.0, 1.0);

/// A->B (1), B->C (1), A->D (5), D->C (1), inserted in that order.
fn diamond() -> RoadGraph {
    let mut graph = RoadGraph::new();
    for point in [A, B, C, D] {
        assert!(graph.add_vertex(point));
    }
    graph.add_edge(A, B, "AB", "residential", 1.0).unwrap();
    graph.add_edge(B, C, "BC", "residential", 1.0).unwrap();
    graph.add_edge(A, D, "AD", "residential", 5.0).unwrap();
    graph.add_edge(D, C, "DC", "residential", 1.0).unwrap();
    graph
}

fn path_length(graph: &RoadGraph, path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| {
            graph
                .edge_between(&pair[0], &pair[1])
                .expect("consecutive steps are connected")
                .length()
        })
        .sum()
}

#[test]
fn counts_follow_insertions() {
    let graph = diamond();
    assert_eq!(graph.num_vertices(), 4);
    assert_eq!(graph.num_edges(), 4);
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![A, B, C, D]);
}

#[test]
fn adding_a_vertex_twice_is_a_no_op() {
    let mut graph = diamond();
    assert!(!graph.add_vertex(GeoPoint::new(1.0, 0.0)));
    assert_eq!(graph.num_vertices(), 4);
    assert_eq!(graph.num_edges(), 4);
}

#[test]
fn edge_to_missing_vertex_is_rejected_without_side_effects() {
    let mut graph = diamond();
    let error = graph
        .add_edge(A, GeoPoint::new(9.0, 9.0), "Nowhere", "residential", 1.0)
        .expect_err("destination missing");
    assert!(matches!(error, Error::InvalidEdge { .. }));
    assert!(error.to_string().contains("invalid edge"));
    assert_eq!(graph.num_edges(), 4);
    assert_eq!(graph.neighbours(&A).len(), 2);
}

#[test]
fn bfs_prefers_first_inserted_route_among_equal_hops() {
    let graph = diamond();
    let path = graph.bfs(A, C).unwrap().expect("route exists");
    assert_eq!(path, vec![A, B, C]);
}

#[test]
fn dijkstra_finds_shortest_total_length() {
    let graph = diamond();
    let path = graph.dijkstra(A, C).unwrap().expect("route exists");
    assert_eq!(path, vec![A, B, C]);
    assert_eq!(path_length(&graph, &path), 2.0);
}

#[test]
fn a_star_matches_dijkstra_with_euclidean_heuristic() {
    let graph = diamond();
    let dijkstra = graph.dijkstra(A, C).unwrap().expect("route exists");
    let a_star = graph
        .a_star_search_with(A, C, &Euclidean, |_| {})
        .unwrap()
        .expect("route exists");
    assert_eq!(a_star, vec![A, B, C]);
    assert_eq!(path_length(&graph, &a_star), path_length(&graph, &dijkstra));
}

#[test]
fn default_a_star_matches_dijkstra_on_kilometre_lengths() {
    let mut graph = RoadGraph::new();
    for point in [A, B, C, D] {
        graph.add_vertex(point);
    }
    for (from, to, detour) in [(A, B, 1.0), (B, C, 1.0), (A, D, 5.0), (D, C, 1.0)] {
        graph
            .add_edge(from, to, "Km Rd", "residential", from.distance(&to) * detour)
            .unwrap();
    }

    let dijkstra = graph.dijkstra(A, C).unwrap().expect("route exists");
    let a_star = graph.a_star_search(A, C).unwrap().expect("route exists");
    assert_eq!(a_star, vec![A, B, C]);
    assert_eq!(path_length(&graph, &a_star), path_length(&graph, &dijkstra));
}

#[test]
fn dijkstra_takes_longer_hop_route_when_it_is_shorter() {
    let mut graph = diamond();
    // A direct but long road: BFS takes it, weighted searches do not.
    graph.add_edge(A, C, "Toll Rd", "motorway", 10.0).unwrap();

    assert_eq!(graph.bfs(A, C).unwrap(), Some(vec![A, C]));
    assert_eq!(graph.dijkstra(A, C).unwrap(), Some(vec![A, B, C]));
    assert_eq!(
        graph.a_star_search_with(A, C, &Euclidean, |_| {}).unwrap(),
        Some(vec![A, B, C])
    );
}

#[test]
fn start_equal_to_goal_is_a_single_step_route() {
    let graph = diamond();
    assert_eq!(graph.bfs(B, B).unwrap(), Some(vec![B]));
    assert_eq!(graph.dijkstra(B, B).unwrap(), Some(vec![B]));
    assert_eq!(graph.a_star_search(B, B).unwrap(), Some(vec![B]));
}

#[test]
fn unreachable_goal_yields_no_path() {
    let graph = diamond();
    // Edges are directed: nothing leads back to A.
    assert_eq!(graph.bfs(C, A).unwrap(), None);
    assert_eq!(graph.dijkstra(C, A).unwrap(), None);
    assert_eq!(graph.a_star_search(C, A).unwrap(), None);

    let outside = GeoPoint::new(50.0, 50.0);
    assert_eq!(graph.bfs(A, outside).unwrap(), None);
    assert_eq!(graph.dijkstra(A, outside).unwrap(), None);
    assert_eq!(graph.a_star_search(A, outside).unwrap(), None);
}

#[test]
fn unknown_start_fails_fast() {
    let graph = diamond();
    let outside = GeoPoint::new(50.0, 50.0);
    for result in [
        graph.bfs(outside, A),
        graph.dijkstra(outside, A),
        graph.a_star_search(outside, A),
    ] {
        match result {
            Err(Error::UnknownLocation { location }) => assert_eq!(location, outside),
            other => panic!("expected unknown location, got {other:?}"),
        }
    }
}

#[test]
fn visitor_sees_each_expanded_node_once() {
    let graph = diamond();

    let mut bfs_seen = Vec::new();
    graph
        .bfs_with_visitor(A, C, |p| bfs_seen.push(*p))
        .unwrap()
        .expect("route exists");
    assert_eq!(bfs_seen, vec![A, B, D, C]);

    let mut dijkstra_seen = Vec::new();
    let with_visitor = graph
        .dijkstra_with_visitor(A, C, |p| dijkstra_seen.push(*p))
        .unwrap();
    assert_eq!(dijkstra_seen, vec![A, B, C]);
    assert_eq!(with_visitor, graph.dijkstra(A, C).unwrap());
}

#[test]
fn zero_length_edges_are_searchable() {
    let mut graph = RoadGraph::new();
    for point in [A, B, C] {
        graph.add_vertex(point);
    }
    graph.add_edge(A, B, "Bridge", "service", 0.0).unwrap();
    graph.add_edge(B, C, "Bridge", "service", 0.0).unwrap();
    graph.add_edge(A, C, "Direct", "service", 0.5).unwrap();

    let path = graph.dijkstra(A, C).unwrap().expect("route exists");
    assert_eq!(path, vec![A, B, C]);
}
