//! Human-readable rendering of results, steps and representations

use graphtrace_core::convert::{AdjacencyList, AdjacencyMatrix, EdgeList, Representation};
use graphtrace_core::graph::{
    AlgorithmResult, BipartiteResult, EulerianResult, PathType, Step,
};

fn chain(ids: &[String]) -> String {
    ids.join(" -> ")
}

/// Print the summary of an algorithm result
pub fn result(result: &AlgorithmResult) {
    match result {
        AlgorithmResult::Traversal(r) => {
            println!("Order: {}", chain(&r.order));
            println!("Visited: {} nodes", r.count);
        }
        AlgorithmResult::ShortestPath(r) => match &r.path {
            Some(path) => {
                println!("Path: {}", chain(path));
                println!("Distance: {}", r.distance);
            }
            None => println!("No path (distance {})", r.distance),
        },
        AlgorithmResult::Bipartite(r) => bipartite(r),
        AlgorithmResult::SpanningTree(r) => {
            for edge in &r.edges {
                println!("{} - {} ({})", edge.source, edge.target, edge.weight);
            }
            println!("Total weight: {}", r.total_weight);
        }
        AlgorithmResult::MaxFlow(r) => {
            println!("Max flow: {}", r.max_flow);
            for edge in &r.flow_edges {
                println!(
                    "  {} -> {}: {}/{}",
                    edge.source, edge.target, edge.flow, edge.capacity
                );
            }
        }
        AlgorithmResult::Eulerian(r) => eulerian(r),
    }
}

fn bipartite(r: &BipartiteResult) {
    if r.is_bipartite {
        println!("Bipartite: yes");
        println!("  Set A: {}", r.set_a.join(", "));
        println!("  Set B: {}", r.set_b.join(", "));
    } else {
        match &r.conflict {
            Some(edge) => println!("Bipartite: no (conflict on {} - {})", edge.source, edge.target),
            None => println!("Bipartite: no"),
        }
    }
    if r.treated_as_undirected {
        println!("  (directed edges treated as undirected)");
    }
}

fn eulerian(r: &EulerianResult) {
    match (&r.path, r.path_type) {
        (Some(path), PathType::Circuit) => println!("Eulerian circuit: {}", chain(path)),
        (Some(path), _) => println!("Eulerian path: {}", chain(path)),
        (None, _) => println!("No Eulerian path or circuit"),
    }
}

/// One line per step
pub fn steps(steps: &[Step], quiet: bool) {
    if !quiet {
        println!("Steps ({}):", steps.len());
    }
    for step in steps {
        println!(
            "{:>4}  {:<9} {}",
            step.index,
            step.action.as_str(),
            step.description
        );
    }
}

/// Print a converted representation
pub fn representation(rep: &Representation) {
    match rep {
        Representation::AdjacencyMatrix(m) => matrix(m),
        Representation::AdjacencyList(l) => list(l),
        Representation::EdgeList(e) => edges(e),
    }
}

fn matrix(m: &AdjacencyMatrix) {
    let width = m
        .nodes
        .iter()
        .map(|id| id.len())
        .chain(m.matrix.iter().flatten().flatten().map(|w| w.to_string().len()))
        .max()
        .unwrap_or(1);

    let header: Vec<String> = m.nodes.iter().map(|id| format!("{:>width$}", id)).collect();
    println!("{:>width$}  {}", "", header.join(" "));
    for (id, row) in m.nodes.iter().zip(&m.matrix) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(weight) => format!("{:>width$}", weight),
                None => format!("{:>width$}", "."),
            })
            .collect();
        println!("{:>width$}  {}", id, cells.join(" "));
    }
}

fn list(l: &AdjacencyList) {
    for entry in &l.adjacency {
        let neighbors: Vec<String> = entry
            .neighbors
            .iter()
            .map(|n| format!("{}({})", n.node, n.weight))
            .collect();
        println!("{}: {}", entry.node, neighbors.join(", "));
    }
}

fn edges(e: &EdgeList) {
    for edge in &e.edges {
        let arrow = if e.directed || edge.directed { "->" } else { "-" };
        println!("{} {} {} ({})", edge.source, arrow, edge.target, edge.weight);
    }
}
