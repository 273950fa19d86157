use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::model::GraphModel;
use crate::graph::step::{StepAction, StepRecorder};
use crate::graph::types::{Distance, PathResult};

/// Wrapper for BinaryHeap to use as min-heap (ordered by tentative distance)
///
/// Equal distances fall back to the node's input position, which keeps the
/// finalization order and therefore the recorded steps reproducible.
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub node: usize,
    pub distance: Distance,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// State tracked during Dijkstra search
struct DijkstraState {
    distances: Vec<Distance>,
    parents: Vec<Option<usize>>,
    finalized: Vec<bool>,
    order: Vec<usize>,
    heap: BinaryHeap<Reverse<HeapEntry>>,
}

impl DijkstraState {
    fn new(node_count: usize, source: usize) -> Self {
        let mut state = Self {
            distances: vec![Distance::INFINITY; node_count],
            parents: vec![None; node_count],
            finalized: vec![false; node_count],
            order: Vec::new(),
            heap: BinaryHeap::new(),
        };
        state.distances[source] = Distance::ZERO;
        state.heap.push(Reverse(HeapEntry {
            node: source,
            distance: Distance::ZERO,
        }));
        state
    }

    /// Relax every edge out of `current`, returning the improved neighbors
    fn relax_from(&mut self, graph: &GraphModel, current: usize) -> Vec<usize> {
        let mut improved = Vec::new();
        for adj in graph.neighbors(current) {
            if self.finalized[adj.node] {
                continue;
            }
            let candidate = self.distances[current] + graph.edge(adj.edge).weight;
            if candidate < self.distances[adj.node] {
                self.distances[adj.node] = candidate;
                self.parents[adj.node] = Some(current);
                self.heap.push(Reverse(HeapEntry {
                    node: adj.node,
                    distance: candidate,
                }));
                improved.push(adj.node);
            }
        }
        improved
    }

    /// Pending nodes in priority order, one entry per node
    fn frontier(&self, graph: &GraphModel) -> Vec<String> {
        let mut pending: Vec<HeapEntry> = self
            .heap
            .iter()
            .map(|Reverse(entry)| *entry)
            .filter(|entry| {
                !self.finalized[entry.node] && entry.distance == self.distances[entry.node]
            })
            .collect();
        pending.sort();
        pending.dedup_by_key(|entry| entry.node);
        pending
            .into_iter()
            .map(|entry| graph.id(entry.node).to_string())
            .collect()
    }

    fn distance_map(&self, graph: &GraphModel) -> BTreeMap<String, Distance> {
        self.distances
            .iter()
            .enumerate()
            .map(|(i, d)| (graph.id(i).to_string(), *d))
            .collect()
    }

    fn parent_map(&self, graph: &GraphModel) -> BTreeMap<String, Option<String>> {
        self.parents
            .iter()
            .enumerate()
            .map(|(i, p)| (graph.id(i).to_string(), p.map(|p| graph.id(p).to_string())))
            .collect()
    }

    fn path_to(&self, graph: &GraphModel, target: usize) -> Option<Vec<String>> {
        if !self.distances[target].is_finite() {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parents[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(graph.ids(&path))
    }
}

fn check_non_negative(graph: &GraphModel) -> Result<()> {
    match graph.edges().iter().find(|e| e.weight < 0.0) {
        Some(edge) => Err(GraphError::NegativeWeight {
            from: graph.id(edge.source).to_string(),
            to: graph.id(edge.target).to_string(),
            weight: edge.weight,
        }),
        None => Ok(()),
    }
}

/// Shortest path from `start` to `end` with Dijkstra's algorithm
///
/// Records one `finalize` step per node whose distance becomes final, with
/// the full distance and parent maps after relaxing its edges. The search
/// stops as soon as `end` is finalized.
#[tracing::instrument(skip(graph, recorder), fields(start = %start, end = %end))]
pub fn dijkstra(
    graph: &GraphModel,
    start: &str,
    end: &str,
    recorder: &mut StepRecorder,
) -> Result<PathResult> {
    graph.require_nodes("dijkstra")?;
    let source = graph.require(start)?;
    let target = graph.require(end)?;
    check_non_negative(graph)?;

    let mut state = DijkstraState::new(graph.node_count(), source);

    while let Some(Reverse(HeapEntry { node: current, .. })) = state.heap.pop() {
        if state.finalized[current] {
            continue;
        }
        state.finalized[current] = true;
        state.order.push(current);

        let improved = state.relax_from(graph, current);
        let current_id = graph.id(current);
        let mut description = format!(
            "Finalize {} at distance {}",
            current_id, state.distances[current]
        );
        if !improved.is_empty() {
            description.push_str(&format!("; relax {}", graph.ids(&improved).join(", ")));
        }

        let step = recorder
            .record(StepAction::Finalize, description)
            .node(current_id)
            .visited(graph.ids(&state.order))
            .queue(state.frontier(graph))
            .distances(state.distance_map(graph))
            .parents(state.parent_map(graph));
        if let Some(parent) = state.parents[current] {
            step.edge(graph.id(parent), current_id);
        }

        if current == target {
            break;
        }
    }

    let path = state.path_to(graph, target);
    let distance = state.distances[target];
    debug!(
        reachable = path.is_some(),
        distance = %distance,
        finalized = state.order.len(),
        "dijkstra_complete"
    );

    Ok(PathResult { path, distance })
}

#[cfg(test)]
mod tests;
