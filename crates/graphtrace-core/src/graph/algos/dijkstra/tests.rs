use super::*;
use crate::description::GraphDescription;
use crate::error::ErrorKind;

fn square() -> GraphModel {
    GraphModel::build(&GraphDescription::undirected(
        ["A", "B", "C", "D"],
        [("A", "B", 1.0), ("B", "C", 2.0), ("C", "D", 1.0), ("A", "D", 4.0)],
    ))
    .unwrap()
}

/// Test HeapEntry comparison ordering
#[test]
fn test_heap_entry_ordering() {
    let entry1 = HeapEntry {
        node: 0,
        distance: Distance::new(1.0),
    };
    let entry2 = HeapEntry {
        node: 1,
        distance: Distance::new(2.0),
    };
    let entry3 = HeapEntry {
        node: 2,
        distance: Distance::new(1.0),
    };

    assert_eq!(entry1.cmp(&entry2), std::cmp::Ordering::Less);
    assert_eq!(entry2.cmp(&entry1), std::cmp::Ordering::Greater);

    // Equal distances break ties on input position
    assert_eq!(entry1.cmp(&entry3), std::cmp::Ordering::Less);

    assert_eq!(entry1, entry1);
    assert_ne!(entry1, entry2);
}

#[test]
fn test_shortest_path_square() {
    let mut recorder = StepRecorder::new();
    let result = dijkstra(&square(), "A", "C", &mut recorder).unwrap();

    assert_eq!(result.distance.value(), 3.0);
    assert_eq!(
        result.path,
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
}

#[test]
fn test_one_step_per_finalized_node() {
    let mut recorder = StepRecorder::new();
    dijkstra(&square(), "A", "C", &mut recorder).unwrap();

    // A(0), B(1), C(3) are finalized; D(4) is never reached before C
    let finalized: Vec<&str> = recorder
        .steps()
        .iter()
        .map(|s| s.focus_node.as_deref().unwrap())
        .collect();
    assert_eq!(finalized, vec!["A", "B", "C"]);
    assert!(recorder
        .steps()
        .iter()
        .all(|s| s.action == StepAction::Finalize));
}

#[test]
fn test_last_step_consistent_with_result() {
    let mut recorder = StepRecorder::new();
    let result = dijkstra(&square(), "A", "C", &mut recorder).unwrap();

    let last = recorder.last().unwrap();
    let distances = last.distances.as_ref().unwrap();
    assert_eq!(distances["C"], result.distance);
    let parents = last.parents.as_ref().unwrap();
    assert_eq!(parents["C"].as_deref(), Some("B"));
    assert_eq!(parents["A"], None);
    assert_eq!(last.focus_edge.as_ref().unwrap().source, "B");
}

#[test]
fn test_unreachable_target() {
    let desc = GraphDescription::directed(["A", "B", "C"], [("A", "B", 1.0), ("C", "A", 1.0)]);
    let graph = GraphModel::build(&desc).unwrap();
    let mut recorder = StepRecorder::new();
    let result = dijkstra(&graph, "A", "C", &mut recorder).unwrap();

    assert_eq!(result.path, None);
    assert!(!result.distance.is_finite());
    assert_eq!(recorder.len(), 2);
    let distances = recorder.last().unwrap().distances.as_ref().unwrap();
    assert!(!distances["C"].is_finite());
}

#[test]
fn test_start_equals_end() {
    let result = dijkstra(&square(), "B", "B", &mut StepRecorder::new()).unwrap();
    assert_eq!(result.path, Some(vec!["B".to_string()]));
    assert_eq!(result.distance, Distance::ZERO);
}

#[test]
fn test_zero_weight_edges_are_allowed() {
    let desc = GraphDescription::undirected(["A", "B", "C"], [("A", "B", 0.0), ("B", "C", 0.0)]);
    let graph = GraphModel::build(&desc).unwrap();
    let result = dijkstra(&graph, "A", "C", &mut StepRecorder::new()).unwrap();
    assert_eq!(result.distance, Distance::ZERO);
    assert_eq!(result.path.unwrap().len(), 3);
}

#[test]
fn test_negative_weight_rejected() {
    let desc = GraphDescription::undirected(["A", "B"], [("A", "B", -1.0)]);
    let graph = GraphModel::build(&desc).unwrap();
    let mut recorder = StepRecorder::new();
    let err = dijkstra(&graph, "A", "B", &mut recorder).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NegativeWeight);
    assert!(recorder.is_empty());
}

#[test]
fn test_missing_endpoints() {
    let err = dijkstra(&square(), "A", "Z", &mut StepRecorder::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NodeNotFound);
    let err = dijkstra(&square(), "Z", "A", &mut StepRecorder::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NodeNotFound);
}

#[test]
fn test_ties_are_deterministic() {
    // Two equal-cost routes A-B-D and A-C-D
    let desc = GraphDescription::undirected(
        ["A", "B", "C", "D"],
        [("A", "B", 1.0), ("A", "C", 1.0), ("B", "D", 1.0), ("C", "D", 1.0)],
    );
    let graph = GraphModel::build(&desc).unwrap();

    let mut first = StepRecorder::new();
    let mut second = StepRecorder::new();
    let a = dijkstra(&graph, "A", "D", &mut first).unwrap();
    let b = dijkstra(&graph, "A", "D", &mut second).unwrap();

    assert_eq!(a, b);
    assert_eq!(first.steps(), second.steps());
    assert_eq!(a.distance.value(), 2.0);
}

#[test]
fn test_matches_brute_force_distances() {
    let desc = GraphDescription::undirected(
        ["A", "B", "C", "D", "E", "F"],
        [
            ("A", "B", 7.0),
            ("A", "C", 9.0),
            ("A", "F", 14.0),
            ("B", "C", 10.0),
            ("B", "D", 15.0),
            ("C", "D", 11.0),
            ("C", "F", 2.0),
            ("D", "E", 6.0),
            ("E", "F", 9.0),
        ],
    );
    let graph = GraphModel::build(&desc).unwrap();

    // Floyd-Warshall reference
    let n = graph.node_count();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for e in graph.edges() {
        dist[e.source][e.target] = dist[e.source][e.target].min(e.weight);
        dist[e.target][e.source] = dist[e.target][e.source].min(e.weight);
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if dist[i][k] + dist[k][j] < dist[i][j] {
                    dist[i][j] = dist[i][k] + dist[k][j];
                }
            }
        }
    }

    for target in 0..n {
        let result =
            dijkstra(&graph, "A", graph.id(target), &mut StepRecorder::new()).unwrap();
        assert_eq!(result.distance.value(), dist[0][target]);
    }
}
