//! Eulerian paths and circuits
//!
//! Both algorithms share one precondition check, recorded as the first
//! `check` step. Only the graph-level direction decides how edges are
//! walked; per-edge one-way flags are ignored here. When the degree or
//! connectivity conditions fail the answer is a successful negative result,
//! not an error.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::error::Result;
use crate::graph::algos::union_find::UnionFind;
use crate::graph::model::GraphModel;
use crate::graph::step::{StepAction, StepRecorder};
use crate::graph::types::{EdgeRef, EulerianResult, PathType};

/// One incidence: the edge and the node it leads to
#[derive(Debug, Clone, Copy)]
struct Incidence {
    edge: usize,
    to: usize,
}

/// Edge multiset viewed with graph-level direction only
struct EulerGraph {
    directed: bool,
    ends: Vec<(usize, usize)>,
    /// Walkable incidences per node in input edge order
    incident: Vec<Vec<Incidence>>,
}

/// What the precondition check decided
enum Verdict {
    /// A trail of `kind` exists and must start at `start`
    Trail { kind: PathType, start: usize },
    /// Nodes but no edges: the empty circuit on `start`
    Trivial { start: usize },
    NotEulerian,
}

impl EulerGraph {
    fn build(graph: &GraphModel) -> Self {
        let directed = graph.is_directed();
        let mut incident = vec![Vec::new(); graph.node_count()];
        let mut ends = Vec::with_capacity(graph.edge_count());

        for (edge, record) in graph.edges().iter().enumerate() {
            let (u, v) = (record.source, record.target);
            ends.push((u, v));
            incident[u].push(Incidence { edge, to: v });
            if !directed && u != v {
                incident[v].push(Incidence { edge, to: u });
            }
        }

        Self {
            directed,
            ends,
            incident,
        }
    }

    fn edge_count(&self) -> usize {
        self.ends.len()
    }

    fn has_edges(&self, node: usize) -> bool {
        self.ends.iter().any(|&(u, v)| u == node || v == node)
    }

    /// All edges lie in one weakly connected component
    fn edges_connected(&self, node_count: usize) -> bool {
        let mut sets = UnionFind::new(node_count);
        for &(u, v) in &self.ends {
            sets.union(u, v);
        }
        let mut roots = self.ends.iter().map(|&(u, _)| sets.find(u));
        match roots.next() {
            Some(first) => roots.all(|root| root == first),
            None => true,
        }
    }

    /// Nodes reachable from `from` over unused edges
    fn reachable(&self, from: usize, used: &[bool]) -> Vec<bool> {
        let mut seen = vec![false; self.incident.len()];
        let mut queue = VecDeque::from([from]);
        seen[from] = true;
        while let Some(node) = queue.pop_front() {
            for inc in &self.incident[node] {
                if !used[inc.edge] && !seen[inc.to] {
                    seen[inc.to] = true;
                    queue.push_back(inc.to);
                }
            }
        }
        seen
    }
}

/// Evaluate the degree and connectivity conditions and record the `check` step
fn precheck(
    graph: &GraphModel,
    euler: &EulerGraph,
    start: Option<&str>,
    recorder: &mut StepRecorder,
) -> Result<Verdict> {
    graph.require_nodes("eulerian")?;
    let requested = start.map(|id| graph.require(id)).transpose()?;
    let n = graph.node_count();

    if euler.edge_count() == 0 {
        let start = requested.unwrap_or(0);
        recorder
            .record(
                StepAction::Check,
                format!("No edges: trivial circuit on {}", graph.id(start)),
            )
            .node(graph.id(start));
        return Ok(Verdict::Trivial { start });
    }

    let connected = euler.edges_connected(n);
    let mut sets = BTreeMap::new();
    let (verdict, summary) = if euler.directed {
        directed_verdict(graph, euler, connected, requested, &mut sets)
    } else {
        undirected_verdict(graph, euler, connected, requested, &mut sets)
    };

    let description = match &verdict {
        Verdict::Trail { kind, start } => format!(
            "Eulerian {} exists ({}); start at {}",
            kind,
            summary,
            graph.id(*start)
        ),
        _ => format!("No Eulerian path: {}", summary),
    };
    let step = recorder.record(StepAction::Check, description).sets(sets);
    if let Verdict::Trail { start, .. } = &verdict {
        step.node(graph.id(*start));
    }

    Ok(verdict)
}

/// In/out balance conditions; `sets` gets the surplus and deficit nodes
fn directed_verdict(
    graph: &GraphModel,
    euler: &EulerGraph,
    connected: bool,
    requested: Option<usize>,
    sets: &mut BTreeMap<String, Vec<String>>,
) -> (Verdict, String) {
    let n = graph.node_count();
    let mut balance = vec![0i64; n];
    for &(u, v) in &euler.ends {
        balance[u] += 1;
        balance[v] -= 1;
    }
    let surplus: Vec<usize> = (0..n).filter(|&i| balance[i] == 1).collect();
    let deficit: Vec<usize> = (0..n).filter(|&i| balance[i] == -1).collect();
    let unbalanced = balance.iter().filter(|&&b| b != 0).count();
    sets.insert("surplus".to_string(), graph.ids(&surplus));
    sets.insert("deficit".to_string(), graph.ids(&deficit));

    if !connected {
        (Verdict::NotEulerian, "edges are not weakly connected".to_string())
    } else if unbalanced == 0 {
        (
            Verdict::Trail {
                kind: PathType::Circuit,
                start: circuit_start(euler, requested),
            },
            "every node has in-degree equal to out-degree".to_string(),
        )
    } else if unbalanced == 2 && surplus.len() == 1 && deficit.len() == 1 {
        (
            Verdict::Trail {
                kind: PathType::Path,
                start: surplus[0],
            },
            format!(
                "{} has one extra outgoing edge and {} one extra incoming edge",
                graph.id(surplus[0]),
                graph.id(deficit[0])
            ),
        )
    } else {
        (
            Verdict::NotEulerian,
            format!("{} nodes have unbalanced in/out degree", unbalanced),
        )
    }
}

/// Degree parity conditions; a self-loop adds 2 to its node's degree
fn undirected_verdict(
    graph: &GraphModel,
    euler: &EulerGraph,
    connected: bool,
    requested: Option<usize>,
    sets: &mut BTreeMap<String, Vec<String>>,
) -> (Verdict, String) {
    let n = graph.node_count();
    let mut degree = vec![0usize; n];
    for &(u, v) in &euler.ends {
        degree[u] += 1;
        degree[v] += 1;
    }
    let odd: Vec<usize> = (0..n).filter(|&i| degree[i] % 2 == 1).collect();
    sets.insert("odd".to_string(), graph.ids(&odd));

    if !connected {
        (Verdict::NotEulerian, "edges are not connected".to_string())
    } else if odd.is_empty() {
        (
            Verdict::Trail {
                kind: PathType::Circuit,
                start: circuit_start(euler, requested),
            },
            "every node has even degree".to_string(),
        )
    } else if odd.len() == 2 {
        // Either odd node can open the path; honour the request when it is one
        let start = match requested {
            Some(node) if odd.contains(&node) => node,
            _ => odd[0],
        };
        (
            Verdict::Trail {
                kind: PathType::Path,
                start,
            },
            format!(
                "exactly two odd-degree nodes ({} and {})",
                graph.id(odd[0]),
                graph.id(odd[1])
            ),
        )
    } else {
        (
            Verdict::NotEulerian,
            format!("{} nodes have odd degree", odd.len()),
        )
    }
}

/// The requested node when it has edges, else the first node that does
fn circuit_start(euler: &EulerGraph, requested: Option<usize>) -> usize {
    requested
        .filter(|&node| euler.has_edges(node))
        .or_else(|| (0..euler.incident.len()).find(|&node| euler.has_edges(node)))
        .unwrap_or(0)
}

fn trivial(graph: &GraphModel, start: usize) -> EulerianResult {
    EulerianResult {
        has_eulerian_path: true,
        has_eulerian_circuit: true,
        path: Some(vec![graph.id(start).to_string()]),
        path_type: PathType::Circuit,
        edges: Vec::new(),
    }
}

fn found(kind: PathType, path: Vec<String>, edges: Vec<EdgeRef>) -> EulerianResult {
    EulerianResult {
        has_eulerian_path: true,
        has_eulerian_circuit: kind == PathType::Circuit,
        path: Some(path),
        path_type: kind,
        edges,
    }
}

/// Eulerian trail by Fleury's algorithm
///
/// At each node the first unused incident edge that is not a bridge of the
/// remaining graph is taken; a bridge is crossed only when it is the last
/// option. The bridge test reruns a reachability search for every candidate,
/// so the walk costs O(E²). One `traverse` step per edge.
#[tracing::instrument(skip(graph, recorder), fields(start = ?start))]
pub fn fleury(
    graph: &GraphModel,
    start: Option<&str>,
    recorder: &mut StepRecorder,
) -> Result<EulerianResult> {
    let euler = EulerGraph::build(graph);
    let (kind, mut current) = match precheck(graph, &euler, start, recorder)? {
        Verdict::Trail { kind, start } => (kind, start),
        Verdict::Trivial { start } => return Ok(trivial(graph, start)),
        Verdict::NotEulerian => return Ok(EulerianResult::none()),
    };

    let mut used = vec![false; euler.edge_count()];
    let mut trail = vec![current];
    let mut edges: Vec<EdgeRef> = Vec::new();

    while let Some(step) = next_fleury_edge(&euler, current, &used) {
        used[step.inc.edge] = true;
        let next = step.inc.to;
        trail.push(next);
        edges.push(EdgeRef::new(graph.id(current), graph.id(next)));

        let mut description = format!("Traverse {} - {}", graph.id(current), graph.id(next));
        if step.bridge {
            description.push_str(" (bridge, no other edge left)");
        }
        recorder
            .record(StepAction::Traverse, description)
            .node(graph.id(next))
            .edge(graph.id(current), graph.id(next))
            .visited(graph.ids(&trail))
            .path(graph.ids(&trail));

        current = next;
    }

    debug_assert!(used.iter().all(|&u| u), "fleury left edges unused");
    debug!(edges = edges.len(), "fleury_complete");

    Ok(found(kind, graph.ids(&trail), edges))
}

struct FleuryMove {
    inc: Incidence,
    bridge: bool,
}

/// First unused edge out of `node` whose removal keeps every remaining edge
/// reachable from its far endpoint
fn next_fleury_edge(euler: &EulerGraph, node: usize, used: &[bool]) -> Option<FleuryMove> {
    let candidates: Vec<Incidence> = euler.incident[node]
        .iter()
        .filter(|inc| !used[inc.edge])
        .copied()
        .collect();

    let first = *candidates.first()?;
    if candidates.len() == 1 {
        return Some(FleuryMove {
            inc: first,
            bridge: strands_edges(euler, first, used),
        });
    }

    let chosen = candidates
        .iter()
        .find(|&&inc| !strands_edges(euler, inc, used))
        .map(|&inc| FleuryMove { inc, bridge: false })
        .unwrap_or(FleuryMove {
            inc: first,
            bridge: true,
        });
    Some(chosen)
}

/// Whether crossing `inc` would leave some unused edge unreachable
fn strands_edges(euler: &EulerGraph, inc: Incidence, used: &[bool]) -> bool {
    let mut after = used.to_vec();
    after[inc.edge] = true;
    let reach = euler.reachable(inc.to, &after);
    euler
        .ends
        .iter()
        .enumerate()
        .any(|(edge, &(u, _))| !after[edge] && !reach[u])
}

/// Eulerian trail by Hierholzer's algorithm
///
/// Iterative: follow unused edges, pushing each reached node, until stuck;
/// then pop the stuck node into the result. The trail is the reversed pop
/// order. Records a `push` per edge followed and a `pop` per node emitted.
#[tracing::instrument(skip(graph, recorder), fields(start = ?start))]
pub fn hierholzer(
    graph: &GraphModel,
    start: Option<&str>,
    recorder: &mut StepRecorder,
) -> Result<EulerianResult> {
    let euler = EulerGraph::build(graph);
    let (kind, first) = match precheck(graph, &euler, start, recorder)? {
        Verdict::Trail { kind, start } => (kind, start),
        Verdict::Trivial { start } => return Ok(trivial(graph, start)),
        Verdict::NotEulerian => return Ok(EulerianResult::none()),
    };

    let mut used = vec![false; euler.edge_count()];
    let mut cursor = vec![0usize; graph.node_count()];
    // (node, edge it was reached by, node it was reached from)
    let mut stack: Vec<(usize, Option<(usize, usize)>)> = vec![(first, None)];
    let mut popped: Vec<usize> = Vec::new();
    let mut popped_edges: Vec<EdgeRef> = Vec::new();

    while let Some(&(node, _)) = stack.last() {
        let incident = &euler.incident[node];
        while cursor[node] < incident.len() && used[incident[cursor[node]].edge] {
            cursor[node] += 1;
        }

        if let Some(&inc) = incident.get(cursor[node]) {
            used[inc.edge] = true;
            stack.push((inc.to, Some((inc.edge, node))));
            let stack_ids: Vec<String> = stack.iter().map(|&(n, _)| graph.id(n).to_string()).collect();
            recorder
                .record(
                    StepAction::Push,
                    format!("Follow {} - {} and push {}", graph.id(node), graph.id(inc.to), graph.id(inc.to)),
                )
                .node(graph.id(inc.to))
                .edge(graph.id(node), graph.id(inc.to))
                .stack(stack_ids)
                .path(graph.ids(&popped));
            continue;
        }

        let Some((node, via)) = stack.pop() else {
            break;
        };
        popped.push(node);
        if let Some((_, from)) = via {
            popped_edges.push(EdgeRef::new(graph.id(from), graph.id(node)));
        }
        let stack_ids: Vec<String> = stack.iter().map(|&(n, _)| graph.id(n).to_string()).collect();
        recorder
            .record(
                StepAction::Pop,
                format!("{} has no unused edges; pop it into the trail", graph.id(node)),
            )
            .node(graph.id(node))
            .stack(stack_ids)
            .path(graph.ids(&popped));
    }

    popped.reverse();
    popped_edges.reverse();
    debug_assert!(used.iter().all(|&u| u), "hierholzer left edges unused");
    debug!(edges = popped_edges.len(), "hierholzer_complete");

    Ok(found(kind, graph.ids(&popped), popped_edges))
}

#[cfg(test)]
mod tests;
