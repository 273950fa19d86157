//! Graph algorithm implementations
//!
//! Every algorithm is a plain function over a [`GraphModel`](crate::graph::GraphModel)
//! that appends its steps to the caller's [`StepRecorder`](crate::graph::StepRecorder):
//! - `traversal`: breadth-first and depth-first search
//! - `dijkstra`: single-pair shortest path
//! - `bipartite`: BFS two-colouring
//! - `mst`: Prim and Kruskal spanning trees
//! - `union_find`: disjoint sets backing Kruskal and connectivity checks
//! - `flow`: Edmonds-Karp maximum flow
//! - `euler`: Fleury and Hierholzer Eulerian trails

pub mod bipartite;
pub mod dijkstra;
pub mod euler;
pub mod flow;
pub mod mst;
pub mod traversal;
pub mod union_find;

pub use bipartite::check_bipartite;
pub use dijkstra::dijkstra;
pub use euler::{fleury, hierholzer};
pub use flow::edmonds_karp;
pub use mst::{kruskal, prim};
pub use traversal::{bfs, dfs};
pub use union_find::UnionFind;
