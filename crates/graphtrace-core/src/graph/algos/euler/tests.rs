use super::*;
use crate::description::GraphDescription;
use crate::error::ErrorKind;

fn undirected(nodes: &[&str], edges: &[(&str, &str)]) -> GraphModel {
    let desc = GraphDescription::undirected(
        nodes.iter().copied(),
        edges.iter().map(|&(s, t)| (s, t, 1.0)),
    );
    GraphModel::build(&desc).unwrap()
}

fn directed(nodes: &[&str], edges: &[(&str, &str)]) -> GraphModel {
    let desc = GraphDescription::directed(
        nodes.iter().copied(),
        edges.iter().map(|&(s, t)| (s, t, 1.0)),
    );
    GraphModel::build(&desc).unwrap()
}

type Algorithm = fn(&GraphModel, Option<&str>, &mut StepRecorder) -> Result<EulerianResult>;

const BOTH: [(&str, Algorithm); 2] = [("fleury", fleury), ("hierholzer", hierholzer)];

fn path_of(result: &EulerianResult) -> Vec<&str> {
    result
        .path
        .as_ref()
        .map(|p| p.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn test_simple_path_graph() {
    let graph = undirected(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);

    for (name, algorithm) in BOTH {
        let result = algorithm(&graph, None, &mut StepRecorder::new()).unwrap();
        assert_eq!(result.path_type, PathType::Path, "{}", name);
        assert!(result.has_eulerian_path);
        assert!(!result.has_eulerian_circuit);
        assert_eq!(path_of(&result), vec!["A", "B", "C", "D"], "{}", name);
    }
}

#[test]
fn test_square_is_a_circuit() {
    let graph = undirected(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
    );

    for (name, algorithm) in BOTH {
        let result = algorithm(&graph, Some("C"), &mut StepRecorder::new()).unwrap();
        assert_eq!(result.path_type, PathType::Circuit, "{}", name);
        assert!(result.has_eulerian_circuit);
        let path = path_of(&result);
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&"C"));
        assert_eq!(path.last(), Some(&"C"));
    }
}

#[test]
fn test_fleury_avoids_bridge_while_alternatives_remain() {
    // A-B is declared first but crossing it would strand the triangle
    let graph = undirected(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("A", "C"), ("C", "D"), ("D", "A")],
    );
    let mut recorder = StepRecorder::new();
    let result = fleury(&graph, None, &mut recorder).unwrap();

    assert_eq!(path_of(&result), vec!["A", "C", "D", "A", "B"]);
    let first_move = &recorder.steps()[1];
    assert_eq!(first_move.action, StepAction::Traverse);
    assert_eq!(first_move.focus_edge, Some(EdgeRef::new("A", "C")));
}

#[test]
fn test_hierholzer_splices_detour() {
    let graph = undirected(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("A", "C"), ("C", "D"), ("D", "A")],
    );
    let mut recorder = StepRecorder::new();
    let result = hierholzer(&graph, None, &mut recorder).unwrap();

    assert_eq!(path_of(&result), vec!["A", "C", "D", "A", "B"]);
    assert_eq!(
        result.edges,
        vec![
            EdgeRef::new("A", "C"),
            EdgeRef::new("C", "D"),
            EdgeRef::new("D", "A"),
            EdgeRef::new("A", "B"),
        ]
    );

    let pushes = recorder
        .steps()
        .iter()
        .filter(|s| s.action == StepAction::Push)
        .count();
    let pops = recorder
        .steps()
        .iter()
        .filter(|s| s.action == StepAction::Pop)
        .count();
    assert_eq!(pushes, 4);
    assert_eq!(pops, 5);
    assert!(recorder.last().unwrap().stack.is_empty());
}

#[test]
fn test_every_edge_used_once() {
    let graph = undirected(
        &["A", "B", "C", "D", "E"],
        &[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
            ("D", "E"),
            ("E", "C"),
        ],
    );

    for (name, algorithm) in BOTH {
        let result = algorithm(&graph, None, &mut StepRecorder::new()).unwrap();
        assert_eq!(result.edges.len(), graph.edge_count(), "{}", name);
        assert_eq!(path_of(&result).len(), graph.edge_count() + 1);

        let mut seen: Vec<(String, String)> = result
            .edges
            .iter()
            .map(|e| {
                let mut pair = [e.source.clone(), e.target.clone()];
                pair.sort();
                (pair[0].clone(), pair[1].clone())
            })
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), graph.edge_count(), "{}", name);
    }
}

#[test]
fn test_self_loop_counts_twice() {
    let graph = undirected(&["A", "B", "C"], &[("A", "B"), ("B", "B"), ("B", "C")]);

    for (name, algorithm) in BOTH {
        let result = algorithm(&graph, None, &mut StepRecorder::new()).unwrap();
        assert_eq!(path_of(&result), vec!["A", "B", "B", "C"], "{}", name);
    }
}

#[test]
fn test_four_odd_nodes_is_not_eulerian() {
    let graph = undirected(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C"), ("A", "D")]);

    for (name, algorithm) in BOTH {
        let mut recorder = StepRecorder::new();
        let result = algorithm(&graph, None, &mut recorder).unwrap();
        assert_eq!(result, EulerianResult::none(), "{}", name);
        assert_eq!(recorder.len(), 1);

        let check = &recorder.steps()[0];
        assert_eq!(check.action, StepAction::Check);
        assert_eq!(check.sets.as_ref().unwrap()["odd"].len(), 4);
    }
}

#[test]
fn test_disconnected_edges_are_not_eulerian() {
    let graph = undirected(
        &["A", "B", "C", "X", "Y", "Z"],
        &[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("X", "Y"),
            ("Y", "Z"),
            ("Z", "X"),
        ],
    );
    let result = hierholzer(&graph, None, &mut StepRecorder::new()).unwrap();
    assert_eq!(result.path_type, PathType::None);
}

#[test]
fn test_isolated_nodes_do_not_matter() {
    let graph = undirected(
        &["Q", "A", "B", "C"],
        &[("A", "B"), ("B", "C"), ("C", "A")],
    );
    let result = fleury(&graph, None, &mut StepRecorder::new()).unwrap();
    assert_eq!(result.path_type, PathType::Circuit);
    assert_eq!(path_of(&result).first(), Some(&"A"));
}

#[test]
fn test_no_edges_is_trivial_circuit() {
    let graph = undirected(&["A", "B"], &[]);

    for (name, algorithm) in BOTH {
        let result = algorithm(&graph, Some("B"), &mut StepRecorder::new()).unwrap();
        assert_eq!(result.path_type, PathType::Circuit, "{}", name);
        assert_eq!(path_of(&result), vec!["B"]);
        assert!(result.edges.is_empty());
    }
}

#[test]
fn test_directed_circuit() {
    let graph = directed(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);

    for (name, algorithm) in BOTH {
        let result = algorithm(&graph, None, &mut StepRecorder::new()).unwrap();
        assert_eq!(result.path_type, PathType::Circuit, "{}", name);
        assert_eq!(path_of(&result), vec!["A", "B", "C", "A"]);
    }
}

#[test]
fn test_directed_path_starts_at_surplus_node() {
    let graph = directed(&["A", "B", "C"], &[("B", "C"), ("A", "B")]);

    for (name, algorithm) in BOTH {
        // The requested start cannot open a directed path, A is forced
        let result = algorithm(&graph, Some("B"), &mut StepRecorder::new()).unwrap();
        assert_eq!(result.path_type, PathType::Path, "{}", name);
        assert_eq!(path_of(&result), vec!["A", "B", "C"]);
    }
}

#[test]
fn test_directed_imbalance_is_not_eulerian() {
    let graph = directed(&["A", "B", "C"], &[("A", "B"), ("A", "C")]);
    let mut recorder = StepRecorder::new();
    let result = fleury(&graph, None, &mut recorder).unwrap();

    assert_eq!(result.path_type, PathType::None);
    let sets = recorder.steps()[0].sets.as_ref().unwrap();
    assert_eq!(sets["deficit"], vec!["B", "C"]);
}

#[test]
fn test_unknown_start_and_empty_graph() {
    let graph = undirected(&["A", "B"], &[("A", "B")]);
    let err = fleury(&graph, Some("Z"), &mut StepRecorder::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NodeNotFound);

    let empty = GraphModel::build(&GraphDescription::default()).unwrap();
    let err = hierholzer(&empty, None, &mut StepRecorder::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyGraph);
}
