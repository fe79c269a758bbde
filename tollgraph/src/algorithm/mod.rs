pub mod dijkstra;
pub mod floyd_warshall;
pub mod path;
pub mod shortest_path;
pub mod trace;

// re-export all algorithm traits
pub use floyd_warshall::AllPairsShortestPath;
pub use shortest_path::{ShortestPath, ShortestPathManyToMany};
pub use trace::DijkstraObserver;
