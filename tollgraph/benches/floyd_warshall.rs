use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tollgraph::algorithm::{AllPairsShortestPath, ShortestPath};
use tollgraph::graph::{Direction, TollGraph};

fn build_grid(size: usize) -> TollGraph {
    let id = |x: usize, y: usize| format!("{}:{}", x, y);
    let mut graph = TollGraph::new();
    for x in 0..size {
        for y in 0..size {
            graph.add_node(id(x, y)).unwrap();
        }
    }
    for x in 0..size {
        for y in 0..size {
            let weight = 1.0 + ((x * 31 + y * 17) % 23) as f64;
            if x + 1 < size {
                graph
                    .add_route(id(x, y), id(x + 1, y), weight, Direction::Bidirectional)
                    .unwrap();
            }
            if y + 1 < size {
                graph
                    .add_route(id(x, y), id(x, y + 1), weight, Direction::Bidirectional)
                    .unwrap();
            }
        }
    }
    graph
}

fn criterion_benchmark(c: &mut Criterion) {
    let graph = build_grid(20);

    let mut group = c.benchmark_group("grid_20x20");
    group.sample_size(10);
    group.bench_function("floyd_warshall", |b| {
        b.iter(|| black_box(&graph).all_pairs_shortest_paths())
    });
    group.bench_function("dijkstra corner to corner", |b| {
        b.iter(|| black_box(&graph).dijkstra_path("0:0", "19:19").unwrap())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
