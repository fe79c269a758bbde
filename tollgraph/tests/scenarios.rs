use tollgraph::algorithm::{AllPairsShortestPath, ShortestPath, ShortestPathManyToMany};
use tollgraph::graph::{Direction, NodeSpec, TollGraph};
use tollgraph::options::{GraphOptions, LogLevel};
use tollgraph::Error;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A -> B (2), A -> C (1), B -> C (2), C -> D (1)
fn small_graph(options: GraphOptions<f64>) -> TollGraph {
    let mut graph = TollGraph::with_options(options);
    graph
        .add_nodes(["A", "B", "C", "D"])
        .unwrap()
        .add_route("A", "B", 2.0, Direction::OneWay)
        .unwrap()
        .add_route("A", "C", 1.0, Direction::OneWay)
        .unwrap()
        .add_route("B", "C", 2.0, Direction::OneWay)
        .unwrap()
        .add_route("C", "D", 1.0, Direction::OneWay)
        .unwrap();
    graph
}

fn primes() -> impl Iterator<Item = u64> {
    (2_u64..).filter(|n| (2..*n).take_while(|d| d * d <= *n).all(|d| n % d != 0))
}

/// Grid with routes towards increasing x and in both directions along y.
///
/// The weights are square roots of distinct primes, so no two different paths
/// between the same nodes have the same cost.
fn grid(size: usize) -> TollGraph {
    let id = |x: usize, y: usize| format!("{}:{}", x, y);
    let mut weights = primes().map(|p| (p as f64).sqrt());

    let mut graph = TollGraph::new();
    for x in 0..size {
        for y in 0..size {
            graph.add_node(id(x, y)).unwrap();
        }
    }
    for x in 0..size {
        for y in 0..size {
            if x + 1 < size {
                graph
                    .add_route(
                        id(x, y),
                        id(x + 1, y),
                        weights.next().unwrap(),
                        Direction::OneWay,
                    )
                    .unwrap();
            }
            if y + 1 < size {
                graph
                    .add_route(
                        id(x, y),
                        id(x, y + 1),
                        weights.next().unwrap(),
                        Direction::Bidirectional,
                    )
                    .unwrap();
            }
        }
    }
    graph
}

#[test]
fn dijkstra_without_tolls() {
    init_logger();
    let graph = small_graph(GraphOptions::new().with_log_level(LogLevel::All));
    let path = graph.dijkstra_path("A", "D").unwrap();
    assert_eq!(path.cost, 2.0);
    assert_eq!(path.nodes, vec!["A", "C", "D"]);
}

#[test]
fn dijkstra_with_tolls() {
    init_logger();
    let mut graph = small_graph(GraphOptions::new().with_auto_create_nodes(true));
    graph
        .set_constant_node_cost(100.0)
        .unwrap()
        .set_node_cost("C", 500.0)
        .unwrap()
        .add_route("B", "D", 200.0, Direction::OneWay)
        .unwrap();

    let path = graph.dijkstra_path("A", "D").unwrap();
    assert_eq!(path.cost, 502.0);
    assert_eq!(path.nodes, vec!["A", "B", "D"]);

    graph.compute_matrices();
    assert_eq!(graph.floyd_warshall_path("A", "D").unwrap(), path);
}

#[test]
fn distance_matrix() {
    init_logger();
    let mut graph = small_graph(GraphOptions::new().with_log_level(LogLevel::Steps));
    graph.add_route("B", "D", 200.0, Direction::OneWay).unwrap();

    let fw = graph.compute_matrices();
    let distances = fw.distances();
    assert_eq!(distances.nodes(), &["A", "B", "C", "D"]);
    assert_eq!(distances.get("A", "D"), Some(2.0));
    // B -> C -> D is cheaper than the direct route
    assert_eq!(distances.get("B", "D"), Some(3.0));
    assert_eq!(distances.get("C", "D"), Some(1.0));
    for node in ["A", "B", "C", "D"] {
        assert_eq!(distances.get(node, node), Some(0.0));
    }
    assert_eq!(distances.get("D", "A"), Some(f64::INFINITY));
    assert_eq!(distances.get("C", "B"), Some(f64::INFINITY));
    assert_eq!(graph.route_weight("B", "D"), Some(200.0));
}

#[test]
fn dijkstra_and_floyd_warshall_agree() {
    let mut graph = grid(6);
    graph.compute_matrices();
    let nodes: Vec<String> = graph.iter_nodes().map(|(id, _)| id.to_string()).collect();
    for start in nodes.iter() {
        for end in nodes.iter() {
            let fw_path = graph.floyd_warshall_path(start, end).unwrap();
            let dijkstra_path = graph.dijkstra_path(start, end).unwrap();
            assert!(
                (dijkstra_path.cost - fw_path.cost).abs() < 1e-9
                    || dijkstra_path.cost == fw_path.cost
            );
            assert_eq!(dijkstra_path.nodes, fw_path.nodes);
        }
    }
}

/// Bidirectional grid where every route has the same weight, so most pairs of nodes are
/// connected by many paths of equal cost.
fn uniform_grid(size: usize) -> TollGraph {
    let id = |x: usize, y: usize| format!("{}:{}", x, y);
    let mut graph = TollGraph::with_options(GraphOptions::new().with_auto_create_nodes(true));
    for x in 0..size {
        for y in 0..size {
            if x + 1 < size {
                graph
                    .add_route(id(x, y), id(x + 1, y), 1.0, Direction::Bidirectional)
                    .unwrap();
            }
            if y + 1 < size {
                graph
                    .add_route(id(x, y), id(x, y + 1), 1.0, Direction::Bidirectional)
                    .unwrap();
            }
        }
    }
    graph
}

#[test]
fn dijkstra_and_floyd_warshall_agree_on_equal_costs() {
    let mut graph = TollGraph::new();
    graph
        .add_nodes(["a", "b", "d", "x"])
        .unwrap()
        .add_route("a", "x", 1.0, Direction::OneWay)
        .unwrap()
        .add_route("x", "d", 3.0, Direction::OneWay)
        .unwrap()
        .add_route("a", "b", 3.0, Direction::OneWay)
        .unwrap()
        .add_route("b", "d", 1.0, Direction::OneWay)
        .unwrap();
    graph.compute_matrices();

    let dijkstra_path = graph.dijkstra_path("a", "d").unwrap();
    let fw_path = graph.floyd_warshall_path("a", "d").unwrap();
    assert_eq!(dijkstra_path.cost, 4.0);
    assert_eq!(dijkstra_path, fw_path);
    assert_eq!(fw_path.nodes, vec!["a", "b", "d"]);
}

#[test]
fn dijkstra_and_floyd_warshall_agree_on_uniform_grid() {
    let mut graph = uniform_grid(5);
    graph.compute_matrices();
    let nodes: Vec<String> = graph.iter_nodes().map(|(id, _)| id.to_string()).collect();
    for start in nodes.iter() {
        for end in nodes.iter() {
            let fw_path = graph.floyd_warshall_path(start, end).unwrap();
            let dijkstra_path = graph.dijkstra_path(start, end).unwrap();
            assert_eq!(dijkstra_path, fw_path, "{} -> {}", start, end);
        }
    }
}

#[test]
fn dijkstra_and_floyd_warshall_agree_with_tolls() {
    let mut graph = grid(4);
    for (i, id) in ["0:1", "1:1", "2:2", "3:0"].iter().enumerate() {
        graph.set_node_cost(*id, 0.5 + i as f64).unwrap();
    }
    graph.compute_matrices();
    for end in ["3:3", "2:1", "0:3"] {
        let dijkstra_path = graph.dijkstra_path("0:0", end).unwrap();
        let fw_path = graph.floyd_warshall_path("0:0", end).unwrap();
        assert!((dijkstra_path.cost - fw_path.cost).abs() < 1e-9);
        assert_eq!(dijkstra_path.nodes, fw_path.nodes);
    }
}

#[test]
fn floyd_warshall_is_idempotent() {
    let graph = grid(5);
    let first = graph.all_pairs_shortest_paths();
    let second = graph.all_pairs_shortest_paths();
    assert_eq!(first, second);
}

#[test]
fn avoided_node_blocks_transit() {
    let mut graph = small_graph(GraphOptions::new());
    graph.avoid_node("C").unwrap();

    let path = graph.dijkstra_path("A", "D").unwrap();
    assert_eq!(path.cost, f64::INFINITY);
    assert!(!path.is_reachable());

    graph.compute_matrices();
    assert_eq!(graph.floyd_warshall_path("A", "D").unwrap().cost, f64::INFINITY);

    // the routes touching C are still there
    assert_eq!(graph.route_weight("A", "C"), Some(1.0));
    assert_eq!(graph.route_weight("C", "D"), Some(1.0));

    // B is still reachable
    assert_eq!(graph.dijkstra_path("A", "B").unwrap().cost, 2.0);
}

#[test]
fn avoided_route_is_bypassed() {
    let mut graph = small_graph(GraphOptions::new());
    graph.avoid_route("A", "C", Direction::OneWay).unwrap();
    let path = graph.dijkstra_path("A", "D").unwrap();
    assert_eq!(path.nodes, vec!["A", "B", "C", "D"]);
    assert_eq!(path.cost, 5.0);
}

#[test]
fn deleted_node_leaves_no_dangling_routes() {
    let mut graph = small_graph(GraphOptions::new());
    graph.delete_node("C").unwrap();
    assert!(graph
        .iter_routes()
        .all(|(from, to, _)| from != "C" && to != "C"));
    assert_eq!(graph.num_routes(), 1);
    assert_eq!(
        graph.dijkstra_path("A", "C").err(),
        Some(Error::NodeNotFound("C".to_string()))
    );
}

#[test]
fn duplicate_node_leaves_graph_unchanged() {
    let mut graph = small_graph(GraphOptions::new());
    graph
        .add_node(NodeSpec::new("E").with_cost(3.0).protected())
        .unwrap();
    let num_nodes = graph.num_nodes();
    assert_eq!(
        graph.add_node(NodeSpec::new("E").with_cost(9.0)).err(),
        Some(Error::DuplicateNode("E".to_string()))
    );
    assert_eq!(graph.num_nodes(), num_nodes);
    assert_eq!(graph.node_cost("E"), Some(3.0));
}

#[test]
fn scaling_weights_back_and_forth() {
    let mut graph = grid(3);
    let original: Vec<f64> = graph.iter_routes().map(|(_, _, w)| w).collect();
    graph
        .scale_route_weights(7.0)
        .unwrap()
        .scale_route_weights(1.0 / 7.0)
        .unwrap();
    for (restored, original) in graph.iter_routes().map(|(_, _, w)| w).zip(original) {
        assert!((restored - original).abs() < 1e-9);
    }
}

#[test]
fn scaled_node_costs_are_charged() {
    let mut graph = small_graph(GraphOptions::new().with_constant_node_cost(1.0));
    graph.set_constant_node_cost(1.0).unwrap();
    // 1 (A) + 1 + 1 (C) + 1 + 1 (D)
    assert_eq!(graph.dijkstra_path("A", "D").unwrap().cost, 5.0);
    graph.scale_node_costs(2.0).unwrap();
    assert_eq!(graph.dijkstra_path("A", "D").unwrap().cost, 8.0);
}

#[test]
fn renamed_node_is_routed_through() {
    let mut graph = small_graph(GraphOptions::new());
    graph.rename_node("C", "Z").unwrap();
    let path = graph.dijkstra_path("A", "D").unwrap();
    assert_eq!(path.nodes, vec!["A", "Z", "D"]);
}

#[test]
fn numeric_identifiers() {
    let mut graph: TollGraph = TollGraph::new();
    graph
        .add_nodes([1_u32, 2, 3])
        .unwrap()
        .add_route(1_u32, 2_u32, 4.0, Direction::OneWay)
        .unwrap()
        .add_route("2", 3_u32, 4.0, Direction::OneWay)
        .unwrap();
    let path = graph.dijkstra_path(1_u32, "3").unwrap();
    assert_eq!(path.nodes, vec!["1", "2", "3"]);
}

#[test]
fn many_to_many_matches_single_paths() {
    let graph = grid(4);
    let origins = ["0:0", "1:2", "3:3"];
    let destinations = ["3:3", "0:3", "2:0"];
    let paths = graph
        .shortest_path_many_to_many(origins, destinations)
        .unwrap();
    for origin in origins {
        let origin_paths = paths.get(origin).unwrap();
        assert!(!origin_paths.is_empty());
        for path in origin_paths {
            let single = graph
                .dijkstra_path(origin, path.destination().unwrap())
                .unwrap();
            assert_eq!(&single, path);
        }
    }
}

#[test]
fn formatted_costs() {
    use tollgraph::format::CostFormat;

    let graph = small_graph(
        GraphOptions::new().with_cost_format(CostFormat::new().with_prefix("$").with_precision(2)),
    );
    let path = graph.dijkstra_path("A", "D").unwrap();
    assert_eq!(graph.format_cost(path.cost), "$2.00");
    assert_eq!(path.to_string(), "A -> C -> D");
}
