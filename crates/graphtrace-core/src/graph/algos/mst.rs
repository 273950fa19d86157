use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::algos::union_find::UnionFind;
use crate::graph::model::GraphModel;
use crate::graph::step::{StepAction, StepRecorder};
use crate::graph::types::{SpanningTreeResult, TreeEdge};

/// Candidate edge in Prim's frontier
///
/// Ordered by weight, then by the order it entered the heap, so equal-weight
/// candidates are extracted first-in first-out.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    weight: f64,
    seq: usize,
    edge: usize,
    from: usize,
    to: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

fn require_undirected(graph: &GraphModel, algorithm: &str) -> Result<()> {
    if graph.is_directed() {
        return Err(GraphError::DirectedGraph {
            algorithm: algorithm.to_string(),
        });
    }
    graph.require_nodes(algorithm)
}

fn tree_edge(graph: &GraphModel, from: usize, to: usize, weight: f64) -> TreeEdge {
    TreeEdge {
        source: graph.id(from).to_string(),
        target: graph.id(to).to_string(),
        weight,
    }
}

fn finish(graph: &GraphModel, tree: Vec<TreeEdge>) -> Result<SpanningTreeResult> {
    let required = graph.node_count() - 1;
    if tree.len() < required {
        return Err(GraphError::Disconnected {
            found: tree.len(),
            required,
        });
    }
    let total_weight = tree.iter().map(|e| e.weight).sum();
    Ok(SpanningTreeResult {
        edges: tree,
        total_weight,
    })
}

/// Prim's growing tree and its candidate frontier
struct PrimState {
    in_tree: Vec<bool>,
    tree_nodes: Vec<usize>,
    tree: Vec<TreeEdge>,
    heap: BinaryHeap<Reverse<Candidate>>,
    seq: usize,
}

impl PrimState {
    fn new(node_count: usize) -> Self {
        Self {
            in_tree: vec![false; node_count],
            tree_nodes: Vec::new(),
            tree: Vec::new(),
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Bring `node` into the tree and queue its edges to the outside
    fn add_node(&mut self, graph: &GraphModel, node: usize) {
        self.in_tree[node] = true;
        self.tree_nodes.push(node);
        for adj in graph.undirected_neighbors(node) {
            if self.in_tree[adj.node] {
                continue;
            }
            self.heap.push(Reverse(Candidate {
                weight: graph.edge(adj.edge).weight,
                seq: self.seq,
                edge: adj.edge,
                from: node,
                to: adj.node,
            }));
            self.seq += 1;
        }
    }
}

/// Minimum spanning tree grown from a single node
///
/// Starts at `start`, or the first node when none is given. Every candidate
/// taken off the heap records one step: `accept` when it reaches a new node,
/// `reject` when both ends are already in the tree.
#[tracing::instrument(skip(graph, recorder), fields(start = ?start))]
pub fn prim(
    graph: &GraphModel,
    start: Option<&str>,
    recorder: &mut StepRecorder,
) -> Result<SpanningTreeResult> {
    require_undirected(graph, "prim")?;
    let root = match start {
        Some(id) => graph.require(id)?,
        None => 0,
    };

    let mut state = PrimState::new(graph.node_count());
    state.add_node(graph, root);

    while state.tree.len() + 1 < graph.node_count() {
        let Some(Reverse(candidate)) = state.heap.pop() else {
            break;
        };
        let (from_id, to_id) = (graph.id(candidate.from), graph.id(candidate.to));

        if state.in_tree[candidate.to] {
            recorder
                .record(
                    StepAction::Reject,
                    format!(
                        "Reject {} - {} (weight {}): both ends already in the tree",
                        from_id, to_id, candidate.weight
                    ),
                )
                .edge(from_id, to_id)
                .visited(graph.ids(&state.tree_nodes))
                .partial_edges(state.tree.clone());
            continue;
        }

        state
            .tree
            .push(tree_edge(graph, candidate.from, candidate.to, candidate.weight));
        state.add_node(graph, candidate.to);
        recorder
            .record(
                StepAction::Accept,
                format!(
                    "Accept {} - {} (weight {}), bringing {} into the tree",
                    from_id, to_id, candidate.weight, to_id
                ),
            )
            .node(to_id)
            .edge(from_id, to_id)
            .visited(graph.ids(&state.tree_nodes))
            .partial_edges(state.tree.clone());
        debug!(edge = candidate.edge, "prim_accept");
    }

    debug!(tree_edges = state.tree.len(), steps = recorder.len(), "prim_complete");
    finish(graph, state.tree)
}

fn partition(graph: &GraphModel, sets: &mut UnionFind) -> BTreeMap<String, Vec<String>> {
    sets.groups()
        .into_iter()
        .map(|members| (graph.id(members[0]).to_string(), graph.ids(&members)))
        .collect()
}

/// Minimum spanning tree by global edge order
///
/// Edges are stably sorted by weight, so equal weights keep input order.
/// Every edge examined records a step with the union-find partition, keyed by
/// each set's first member. Stops once the tree has n - 1 edges.
#[tracing::instrument(skip(graph, recorder), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn kruskal(graph: &GraphModel, recorder: &mut StepRecorder) -> Result<SpanningTreeResult> {
    require_undirected(graph, "kruskal")?;

    let mut order: Vec<usize> = (0..graph.edge_count()).collect();
    order.sort_by(|&a, &b| graph.edge(a).weight.total_cmp(&graph.edge(b).weight));

    let mut sets = UnionFind::new(graph.node_count());
    let mut tree: Vec<TreeEdge> = Vec::new();
    let required = graph.node_count() - 1;

    for edge_id in order {
        if tree.len() == required {
            break;
        }
        let edge = graph.edge(edge_id);
        let (from_id, to_id) = (graph.id(edge.source), graph.id(edge.target));

        if sets.union(edge.source, edge.target) {
            tree.push(tree_edge(graph, edge.source, edge.target, edge.weight));
            let snapshot = partition(graph, &mut sets);
            recorder
                .record(
                    StepAction::Accept,
                    format!(
                        "Accept {} - {} (weight {}): joins two components",
                        from_id, to_id, edge.weight
                    ),
                )
                .edge(from_id, to_id)
                .partial_edges(tree.clone())
                .sets(snapshot);
        } else {
            let snapshot = partition(graph, &mut sets);
            recorder
                .record(
                    StepAction::Reject,
                    format!(
                        "Reject {} - {} (weight {}): would close a cycle",
                        from_id, to_id, edge.weight
                    ),
                )
                .edge(from_id, to_id)
                .partial_edges(tree.clone())
                .sets(snapshot);
        }
    }

    debug!(
        tree_edges = tree.len(),
        components = sets.count_sets(),
        "kruskal_complete"
    );
    finish(graph, tree)
}
