//! Maximum flow with Edmonds-Karp
//!
//! The residual network holds arcs in pairs. A one-way edge becomes a forward
//! arc with its capacity and a reverse arc with none; an undirected edge
//! becomes two arcs of full capacity, each the other's twin, so flow can be
//! cancelled from either side. Pushing `b` along an arc lowers its residual
//! and raises its twin's by the same amount.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::model::GraphModel;
use crate::graph::step::{StepAction, StepRecorder};
use crate::graph::types::{FlowEdge, FlowResult};

/// Residual amounts at or below this are treated as zero
const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    residual: f64,
    twin: usize,
}

/// Residual network over the graph's node indices
struct Residual {
    arcs: Vec<Arc>,
    out: Vec<Vec<usize>>,
    /// Forward arc of each input edge, `None` for self-loops
    forward: Vec<Option<usize>>,
}

impl Residual {
    fn build(graph: &GraphModel) -> Result<Self> {
        let mut residual = Self {
            arcs: Vec::with_capacity(graph.edge_count() * 2),
            out: vec![Vec::new(); graph.node_count()],
            forward: Vec::with_capacity(graph.edge_count()),
        };

        for edge in graph.edges() {
            let capacity = edge.capacity();
            if capacity < 0.0 || !capacity.is_finite() {
                return Err(GraphError::malformed(format!(
                    "edge {} -> {} has invalid capacity {}",
                    graph.id(edge.source),
                    graph.id(edge.target),
                    capacity
                )));
            }
            if edge.is_self_loop() {
                residual.forward.push(None);
                continue;
            }
            let back = if edge.directed { 0.0 } else { capacity };
            let arc = residual.add_pair(edge.source, edge.target, capacity, back);
            residual.forward.push(Some(arc));
        }

        Ok(residual)
    }

    fn add_pair(&mut self, from: usize, to: usize, capacity: f64, back: f64) -> usize {
        let forward = self.arcs.len();
        self.arcs.push(Arc {
            to,
            residual: capacity,
            twin: forward + 1,
        });
        self.arcs.push(Arc {
            to: from,
            residual: back,
            twin: forward,
        });
        self.out[from].push(forward);
        self.out[to].push(forward + 1);
        forward
    }

    /// Shortest-hop augmenting path as arc ids, source to sink
    fn augmenting_path(&self, source: usize, sink: usize) -> Option<Vec<usize>> {
        let mut via: Vec<Option<usize>> = vec![None; self.out.len()];
        let mut seen = vec![false; self.out.len()];
        let mut queue = VecDeque::from([source]);
        seen[source] = true;

        while let Some(node) = queue.pop_front() {
            for &arc_id in &self.out[node] {
                let arc = &self.arcs[arc_id];
                if seen[arc.to] || arc.residual <= EPS {
                    continue;
                }
                seen[arc.to] = true;
                via[arc.to] = Some(arc_id);
                if arc.to == sink {
                    return Some(self.trace_back(&via, sink));
                }
                queue.push_back(arc.to);
            }
        }

        None
    }

    fn trace_back(&self, via: &[Option<usize>], sink: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = sink;
        while let Some(arc_id) = via[node] {
            path.push(arc_id);
            node = self.arcs[self.arcs[arc_id].twin].to;
        }
        path.reverse();
        path
    }

    fn push(&mut self, path: &[usize], amount: f64) {
        for &arc_id in path {
            self.arcs[arc_id].residual -= amount;
            let twin = self.arcs[arc_id].twin;
            self.arcs[twin].residual += amount;
        }
    }

    /// Net flow on input edge `edge` in its declared direction (may be negative
    /// for undirected edges carrying flow target to source)
    fn net_flow(&self, graph: &GraphModel, edge: usize) -> f64 {
        match self.forward[edge] {
            Some(arc) => graph.edge(edge).capacity() - self.arcs[arc].residual,
            None => 0.0,
        }
    }

    fn flow_edges(&self, graph: &GraphModel) -> Vec<FlowEdge> {
        (0..graph.edge_count())
            .map(|i| {
                let edge = graph.edge(i);
                let flow = clean(self.net_flow(graph, i));
                let (source, target) = if flow < 0.0 {
                    (edge.target, edge.source)
                } else {
                    (edge.source, edge.target)
                };
                FlowEdge {
                    source: graph.id(source).to_string(),
                    target: graph.id(target).to_string(),
                    flow: flow.abs(),
                    capacity: edge.capacity(),
                }
            })
            .collect()
    }

    /// `"u->v"` to flow; parallel edges share a key and their flows add up
    fn flow_map(&self, graph: &GraphModel) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        for e in self.flow_edges(graph) {
            *map.entry(format!("{}->{}", e.source, e.target)).or_insert(0.0) += e.flow;
        }
        map
    }

    fn path_nodes(&self, graph: &GraphModel, source: usize, path: &[usize]) -> Vec<String> {
        std::iter::once(source)
            .chain(path.iter().map(|&arc| self.arcs[arc].to))
            .map(|n| graph.id(n).to_string())
            .collect()
    }
}

/// Snap values within EPS of zero to zero
fn clean(value: f64) -> f64 {
    if value.abs() <= EPS {
        0.0
    } else {
        value
    }
}

/// Maximum flow from `source` to `sink`
///
/// Capacities fall back to edge weights. Records one `augment` step per
/// augmenting path with the path, the amount pushed and the flow on every
/// edge, then a final `check` step once no augmenting path remains.
#[tracing::instrument(skip(graph, recorder), fields(source = %source, sink = %sink))]
pub fn edmonds_karp(
    graph: &GraphModel,
    source: &str,
    sink: &str,
    recorder: &mut StepRecorder,
) -> Result<FlowResult> {
    graph.require_nodes("max_flow")?;
    let s = graph.require(source)?;
    let t = graph.require(sink)?;
    if s == t {
        return Err(GraphError::InvalidEndpoints {
            id: source.to_string(),
        });
    }

    let mut residual = Residual::build(graph)?;
    let mut max_flow = 0.0;
    let mut augmentations = 0;

    while let Some(path) = residual.augmenting_path(s, t) {
        let amount = path
            .iter()
            .map(|&arc| residual.arcs[arc].residual)
            .fold(f64::INFINITY, f64::min);
        residual.push(&path, amount);
        max_flow += amount;
        augmentations += 1;

        let nodes = residual.path_nodes(graph, s, &path);
        recorder
            .record(
                StepAction::Augment,
                format!("Push {} along {}", amount, nodes.join(" -> ")),
            )
            .path(nodes)
            .amount(amount)
            .flow(residual.flow_map(graph));
    }

    recorder
        .record(
            StepAction::Check,
            format!(
                "No augmenting path from {} to {} remains; maximum flow is {}",
                source, sink, max_flow
            ),
        )
        .flow(residual.flow_map(graph));

    debug!(max_flow, augmentations, "edmonds_karp_complete");

    Ok(FlowResult {
        max_flow,
        flow_edges: residual.flow_edges(graph),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{Edge, GraphDescription, GraphKind};
    use crate::error::ErrorKind;

    fn network() -> GraphModel {
        let mut desc = GraphDescription::directed(
            ["S", "A", "B", "T"],
            [
                ("S", "A", 3.0),
                ("A", "T", 2.0),
                ("S", "B", 2.0),
                ("B", "T", 3.0),
                ("A", "B", 1.0),
            ],
        );
        desc.graph_type = GraphKind::Flow;
        GraphModel::build(&desc).unwrap()
    }

    #[test]
    fn test_max_flow_matches_min_cut() {
        let mut recorder = StepRecorder::new();
        let result = edmonds_karp(&network(), "S", "T", &mut recorder).unwrap();

        // Cut {S} | {A, B, T} has capacity 3 + 2
        assert_eq!(result.max_flow, 5.0);
        let augments = recorder
            .steps()
            .iter()
            .filter(|s| s.action == StepAction::Augment)
            .count();
        assert!(augments >= 2);
        assert_eq!(recorder.last().unwrap().action, StepAction::Check);
    }

    #[test]
    fn test_first_augmentation_is_shortest() {
        let mut recorder = StepRecorder::new();
        edmonds_karp(&network(), "S", "T", &mut recorder).unwrap();

        let first = &recorder.steps()[0];
        assert_eq!(first.path.as_ref().unwrap(), &vec!["S", "A", "T"]);
        assert_eq!(first.amount, Some(2.0));
        assert_eq!(first.flow.as_ref().unwrap()["S->A"], 2.0);
    }

    #[test]
    fn test_flow_conservation_and_capacity() {
        let result = edmonds_karp(&network(), "S", "T", &mut StepRecorder::new()).unwrap();

        for edge in &result.flow_edges {
            assert!(edge.flow >= 0.0);
            assert!(edge.flow <= edge.capacity + EPS);
        }
        for node in ["A", "B"] {
            let inflow: f64 = result
                .flow_edges
                .iter()
                .filter(|e| e.target == node)
                .map(|e| e.flow)
                .sum();
            let outflow: f64 = result
                .flow_edges
                .iter()
                .filter(|e| e.source == node)
                .map(|e| e.flow)
                .sum();
            assert!((inflow - outflow).abs() < EPS);
        }
    }

    #[test]
    fn test_capacity_overrides_weight() {
        let mut desc = GraphDescription::directed(["S", "T"], []);
        desc.edges.push(Edge::new("S", "T", 10.0).with_capacity(4.0));
        let graph = GraphModel::build(&desc).unwrap();
        let result = edmonds_karp(&graph, "S", "T", &mut StepRecorder::new()).unwrap();
        assert_eq!(result.max_flow, 4.0);
    }

    #[test]
    fn test_undirected_edges_carry_flow_either_way() {
        // S - A - T where the A-T edge is declared T-A
        let desc = GraphDescription::undirected(
            ["S", "A", "T"],
            [("S", "A", 3.0), ("T", "A", 2.0)],
        );
        let graph = GraphModel::build(&desc).unwrap();
        let result = edmonds_karp(&graph, "S", "T", &mut StepRecorder::new()).unwrap();

        assert_eq!(result.max_flow, 2.0);
        let second = &result.flow_edges[1];
        assert_eq!((second.source.as_str(), second.target.as_str()), ("A", "T"));
        assert_eq!(second.flow, 2.0);
    }

    #[test]
    fn test_no_path_means_zero_flow() {
        let desc = GraphDescription::directed(["S", "A", "T"], [("S", "A", 1.0), ("T", "A", 1.0)]);
        let graph = GraphModel::build(&desc).unwrap();
        let mut recorder = StepRecorder::new();
        let result = edmonds_karp(&graph, "S", "T", &mut recorder).unwrap();

        assert_eq!(result.max_flow, 0.0);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_source_equals_sink() {
        let err = edmonds_karp(&network(), "S", "S", &mut StepRecorder::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoints);
    }

    #[test]
    fn test_unknown_sink() {
        let err = edmonds_karp(&network(), "S", "Z", &mut StepRecorder::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NodeNotFound);
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let desc = GraphDescription::directed(["S", "T"], [("S", "T", -1.0)]);
        let graph = GraphModel::build(&desc).unwrap();
        let err = edmonds_karp(&graph, "S", "T", &mut StepRecorder::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedGraph);
    }
}
