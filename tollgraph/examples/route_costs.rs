// Builds a small road network and compares the results of both shortest path algorithms.
//
// Run with `RUST_LOG=debug` and `--log-level steps` to see the individual iterations
// of the Dijkstra search.

use clap::{Arg, Command};

use tollgraph::algorithm::ShortestPath;
use tollgraph::format::CostFormat;
use tollgraph::graph::{Direction, GetStats, NodeSpec, TollGraph};
use tollgraph::options::{GraphOptions, LogLevel};

fn main() {
    env_logger::init();

    let matches = Command::new("route_costs")
        .about("Find the cheapest route between two nodes of a small example network")
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .takes_value(true)
                .possible_values(["none", "min", "steps", "all"])
                .default_value("min"),
        )
        .arg(
            Arg::new("toll")
                .long("toll")
                .help("constant toll charged at every town")
                .takes_value(true)
                .default_value("100"),
        )
        .arg(Arg::new("FROM").default_value("A"))
        .arg(Arg::new("TO").default_value("D"))
        .get_matches();

    let log_level = match matches.value_of("log_level").unwrap() {
        "none" => LogLevel::None,
        "steps" => LogLevel::Steps,
        "all" => LogLevel::All,
        _ => LogLevel::Min,
    };
    let toll: f64 = matches
        .value_of("toll")
        .unwrap()
        .parse()
        .expect("invalid toll");

    let mut graph = TollGraph::with_options(
        GraphOptions::new()
            .with_name("example network")
            .with_log_level(log_level)
            .with_auto_create_nodes(true)
            .with_constant_node_cost(toll)
            .with_cost_format(CostFormat::new().with_prefix("$").with_precision(2)),
    );
    graph
        .add_node(NodeSpec::new("C").with_cost(5.0 * toll).protected())
        .expect("adding node failed")
        .add_route("A", "B", 2.0, Direction::OneWay)
        .expect("adding route failed")
        .add_route("A", "C", 1.0, Direction::OneWay)
        .expect("adding route failed")
        .add_route("B", "C", 2.0, Direction::OneWay)
        .expect("adding route failed")
        .add_route("C", "D", 1.0, Direction::OneWay)
        .expect("adding route failed")
        .add_route("B", "D", 200.0, Direction::Bidirectional)
        .expect("adding route failed");

    let stats = graph.get_stats();
    println!(
        "Created graph '{}' ({} nodes, {} routes)",
        stats.name, stats.num_nodes, stats.num_routes
    );

    let from = matches.value_of("FROM").unwrap();
    let to = matches.value_of("TO").unwrap();

    let path = graph.dijkstra_path(from, to).expect("dijkstra failed");
    println!("dijkstra:       {} ({})", path, graph.format_cost(path.cost));

    graph.compute_matrices();
    let path = graph
        .floyd_warshall_path(from, to)
        .expect("floyd-warshall failed");
    println!("floyd-warshall: {} ({})", path, graph.format_cost(path.cost));
}
