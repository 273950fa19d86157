//! Property tests for algorithm invariants over random small graphs

use std::collections::BTreeSet;

use graphtrace_core::convert::{convert, Representation, RepresentationFormat};
use graphtrace_core::graph::algos::{self, UnionFind};
use graphtrace_core::graph::{GraphModel, PathType, StepRecorder};
use graphtrace_core::{Edge, GraphDescription, GraphKind, Node};
use proptest::prelude::*;

fn node_id(i: usize) -> String {
    format!("n{i}")
}

fn describe(n: usize, edges: &[(usize, usize, u32)], directed: bool) -> GraphDescription {
    GraphDescription {
        nodes: (0..n).map(|i| Node::new(node_id(i))).collect(),
        edges: edges
            .iter()
            .map(|&(s, t, w)| Edge::new(node_id(s), node_id(t), f64::from(w)))
            .collect(),
        directed,
        graph_type: if directed {
            GraphKind::Directed
        } else {
            GraphKind::Undirected
        },
        metadata: None,
    }
}

/// Random edge list over `2..max` nodes
fn graph_strategy(max: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2usize..max).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 1u32..20), 0..n * 3),
        )
    })
}

/// Random connected graph: a spanning path plus extra edges
fn connected_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2usize..9).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(1u32..20, n - 1),
            prop::collection::vec((0..n, 0..n, 1u32..20), 0..n * 2),
        )
            .prop_map(|(n, spine, extra)| {
                let mut edges: Vec<(usize, usize, u32)> = spine
                    .into_iter()
                    .enumerate()
                    .map(|(i, w)| (i, i + 1, w))
                    .collect();
                edges.extend(extra);
                (n, edges)
            })
    })
}

/// Capacity of the cheapest s-t cut, by enumerating every source side
fn brute_force_min_cut(n: usize, edges: &[(usize, usize, u32)]) -> f64 {
    let (source, sink) = (0, n - 1);
    let mut best = f64::INFINITY;
    for mask in 0u32..(1 << n) {
        let inside = |v: usize| mask & (1 << v) != 0;
        if !inside(source) || inside(sink) {
            continue;
        }
        let cut: f64 = edges
            .iter()
            .filter(|&&(s, t, _)| inside(s) && !inside(t))
            .map(|&(_, _, c)| f64::from(c))
            .sum();
        best = best.min(cut);
    }
    best
}

/// Bellman-Ford distances from node 0, reference for Dijkstra
fn reference_distances(n: usize, edges: &[(usize, usize, u32)], directed: bool) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; n];
    dist[0] = 0.0;
    for _ in 0..n {
        for &(s, t, w) in edges {
            let w = f64::from(w);
            if dist[s] + w < dist[t] {
                dist[t] = dist[s] + w;
            }
            if !directed && dist[t] + w < dist[s] {
                dist[s] = dist[t] + w;
            }
        }
    }
    dist
}

fn canonical_edges(rep: &Representation) -> Vec<(String, String, u64)> {
    let list = rep.to_edge_list().unwrap();
    let mut edges: Vec<_> = list
        .edges
        .iter()
        .map(|e| {
            let (s, t) = if e.source <= e.target {
                (e.source.clone(), e.target.clone())
            } else {
                (e.target.clone(), e.source.clone())
            };
            (s, t, e.weight.to_bits())
        })
        .collect();
    edges.sort();
    edges
}

proptest! {
    #[test]
    fn prim_and_kruskal_agree_on_weight((n, edges) in connected_strategy()) {
        let graph = GraphModel::build(&describe(n, &edges, false)).unwrap();
        let prim = algos::prim(&graph, None, &mut StepRecorder::new()).unwrap();
        let kruskal = algos::kruskal(&graph, &mut StepRecorder::new()).unwrap();

        prop_assert_eq!(prim.edges.len(), n - 1);
        prop_assert_eq!(kruskal.edges.len(), n - 1);
        prop_assert!((prim.total_weight - kruskal.total_weight).abs() < 1e-9);
    }

    #[test]
    fn union_find_tracks_partition(n in 1usize..30, ops in prop::collection::vec((0usize..30, 0usize..30), 0..60)) {
        let mut sets = UnionFind::new(n);
        let mut naive: Vec<usize> = (0..n).collect();

        for (a, b) in ops {
            let (a, b) = (a % n, b % n);
            let merged = sets.union(a, b);
            prop_assert_eq!(merged, naive[a] != naive[b]);

            let (from, to) = (naive[b], naive[a]);
            for label in naive.iter_mut() {
                if *label == from {
                    *label = to;
                }
            }

            let distinct: BTreeSet<usize> = naive.iter().copied().collect();
            prop_assert_eq!(sets.count_sets(), distinct.len());
            prop_assert_eq!(sets.groups().len(), distinct.len());
        }

        for x in 0..n {
            let root = sets.find(x);
            prop_assert_eq!(sets.find(root), root);
            for y in 0..n {
                prop_assert_eq!(sets.connected(x, y), naive[x] == naive[y]);
            }
        }
    }

    #[test]
    fn max_flow_equals_min_cut((n, edges) in graph_strategy(7)) {
        let mut desc = describe(n, &edges, true);
        desc.graph_type = GraphKind::Flow;
        let graph = GraphModel::build(&desc).unwrap();

        let result = algos::edmonds_karp(&graph, &node_id(0), &node_id(n - 1), &mut StepRecorder::new()).unwrap();
        prop_assert!((result.max_flow - brute_force_min_cut(n, &edges)).abs() < 1e-6);

        for edge in &result.flow_edges {
            prop_assert!(edge.flow >= 0.0);
            prop_assert!(edge.flow <= edge.capacity + 1e-9);
        }
    }

    #[test]
    fn dijkstra_matches_reference((n, edges) in graph_strategy(9), directed in any::<bool>()) {
        let graph = GraphModel::build(&describe(n, &edges, directed)).unwrap();
        let expected = reference_distances(n, &edges, directed);

        for target in 0..n {
            let result = algos::dijkstra(&graph, &node_id(0), &node_id(target), &mut StepRecorder::new()).unwrap();
            if expected[target].is_finite() {
                prop_assert!((result.distance.value() - expected[target]).abs() < 1e-9);
                prop_assert!(result.path.is_some());
            } else {
                prop_assert!(!result.distance.is_finite());
                prop_assert!(result.path.is_none());
            }
        }
    }

    #[test]
    fn bipartite_coloring_is_proper((n, edges) in graph_strategy(10)) {
        let desc = describe(n, &edges, false);
        let graph = GraphModel::build(&desc).unwrap();
        let result = algos::check_bipartite(&graph, &mut StepRecorder::new()).unwrap();

        if result.is_bipartite {
            prop_assert_eq!(result.set_a.len() + result.set_b.len(), n);
            for edge in &desc.edges {
                prop_assert_ne!(result.coloring[&edge.source], result.coloring[&edge.target]);
            }
        } else {
            let conflict = result.conflict.unwrap();
            prop_assert_eq!(result.coloring[&conflict.source], result.coloring[&conflict.target]);
        }
    }

    #[test]
    fn odd_cycles_are_never_bipartite(k in 1usize..10) {
        let n = 2 * k + 1;
        let edges: Vec<(usize, usize, u32)> = (0..n).map(|i| (i, (i + 1) % n, 1)).collect();
        let graph = GraphModel::build(&describe(n, &edges, false)).unwrap();
        let result = algos::check_bipartite(&graph, &mut StepRecorder::new()).unwrap();
        prop_assert!(!result.is_bipartite);
    }

    #[test]
    fn conversions_round_trip((n, raw) in graph_strategy(8)) {
        // Matrices hold one edge per pair, so keep simple graphs
        let mut seen = BTreeSet::new();
        let edges: Vec<_> = raw
            .into_iter()
            .filter(|&(s, t, _)| seen.insert((s.min(t), s.max(t))))
            .collect();
        let desc = describe(n, &edges, false);
        let original = Representation::from_description(&desc, RepresentationFormat::EdgeList).unwrap();

        for format in RepresentationFormat::ALL {
            let there = convert(&original, format).unwrap();
            let back = convert(&there, RepresentationFormat::EdgeList).unwrap();
            prop_assert_eq!(canonical_edges(&back), canonical_edges(&original));
        }
    }

    #[test]
    fn eulerian_trails_use_every_edge_once((n, edges) in graph_strategy(7)) {
        let graph = GraphModel::build(&describe(n, &edges, false)).unwrap();
        let fleury = algos::fleury(&graph, None, &mut StepRecorder::new()).unwrap();
        let hierholzer = algos::hierholzer(&graph, None, &mut StepRecorder::new()).unwrap();

        prop_assert_eq!(fleury.path_type, hierholzer.path_type);
        for result in [&fleury, &hierholzer] {
            if result.path_type == PathType::None {
                prop_assert!(result.path.is_none());
                continue;
            }
            let path = result.path.as_ref().unwrap();
            prop_assert_eq!(result.edges.len(), edges.len());
            prop_assert_eq!(path.len(), edges.len() + 1);
            if result.path_type == PathType::Circuit {
                prop_assert_eq!(path.first(), path.last());
            }
        }
    }

    #[test]
    fn step_indices_are_dense((n, edges) in graph_strategy(8)) {
        let graph = GraphModel::build(&describe(n, &edges, false)).unwrap();
        let mut recorder = StepRecorder::new();
        algos::bfs(&graph, &node_id(0), &mut recorder).unwrap();
        algos::check_bipartite(&graph, &mut recorder).unwrap();

        for (expected, step) in recorder.steps().iter().enumerate() {
            prop_assert_eq!(step.index, expected);
        }
    }
}
