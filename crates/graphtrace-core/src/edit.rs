//! Editing operations on a graph description
//!
//! Each operation validates its input, then returns an edited copy. The
//! original description is never modified.

use serde::{Deserialize, Serialize};

use crate::bail_malformed;
use crate::description::{Edge, GraphDescription};
use crate::error::{GraphError, Result};

fn default_weight() -> f64 {
    1.0
}

/// Parameters for adding one edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEdge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    /// One-way flag; absent means the graph's own directedness applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,
}

impl AddEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: default_weight(),
            capacity: None,
            directed: None,
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Append an edge between two existing nodes
///
/// An explicit `directed: true` on an undirected graph adds a one-way edge.
/// On a directed graph every edge is one-way already, so the flag is left
/// unset there.
pub fn add_edge(desc: &GraphDescription, params: &AddEdge) -> Result<GraphDescription> {
    desc.validate()?;
    for endpoint in [&params.source, &params.target] {
        if !desc.contains_node(endpoint) {
            return Err(GraphError::node_not_found(endpoint));
        }
    }
    if !params.weight.is_finite() {
        bail_malformed!("edge weight must be finite, got {}", params.weight);
    }

    let mut edge = Edge::new(params.source.as_str(), params.target.as_str(), params.weight);
    edge.capacity = params.capacity;
    edge.directed = !desc.is_directed() && params.directed.unwrap_or(false);

    let mut edited = desc.clone();
    edited.edges.push(edge);
    tracing::debug!(source = %params.source, target = %params.target, "edge_added");
    Ok(edited)
}

/// Remove a node together with every edge touching it
pub fn delete_node(desc: &GraphDescription, id: &str) -> Result<GraphDescription> {
    desc.validate()?;
    if !desc.contains_node(id) {
        return Err(GraphError::node_not_found(id));
    }

    let mut edited = desc.clone();
    edited.nodes.retain(|n| n.id != id);
    let before = edited.edges.len();
    edited.edges.retain(|e| e.source != id && e.target != id);
    tracing::debug!(id, removed_edges = before - edited.edges.len(), "node_deleted");
    Ok(edited)
}

/// Remove every edge between `source` and `target`
///
/// Undirected edges match in either orientation; one-way edges only as
/// declared.
pub fn delete_edge(desc: &GraphDescription, source: &str, target: &str) -> Result<GraphDescription> {
    desc.validate()?;
    for endpoint in [source, target] {
        if !desc.contains_node(endpoint) {
            return Err(GraphError::node_not_found(endpoint));
        }
    }

    let graph_directed = desc.is_directed();
    let matches = |edge: &Edge| {
        let forward = edge.source == source && edge.target == target;
        let backward = edge.source == target && edge.target == source;
        forward || (backward && !graph_directed && !edge.directed)
    };

    let mut edited = desc.clone();
    edited.edges.retain(|e| !matches(e));
    let removed = desc.edges.len() - edited.edges.len();
    if removed == 0 {
        return Err(GraphError::EdgeNotFound {
            from: source.to_string(),
            to: target.to_string(),
        });
    }

    tracing::debug!(source, target, removed, "edge_deleted");
    Ok(edited)
}

/// Structural validation without running an algorithm
pub fn validate(desc: &GraphDescription) -> Result<()> {
    desc.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn path() -> GraphDescription {
        GraphDescription::undirected(["A", "B", "C"], [("A", "B", 1.0), ("B", "C", 2.0)])
    }

    #[test]
    fn test_add_edge_defaults() {
        let edited = add_edge(&path(), &AddEdge::new("C", "A")).unwrap();
        let added = edited.edges.last().unwrap();

        assert_eq!(edited.edges.len(), 3);
        assert_eq!(added.weight, 1.0);
        assert!(!added.directed);
        assert_eq!(path().edges.len(), 2);
    }

    #[test]
    fn test_add_one_way_edge_to_undirected_graph() {
        let params = AddEdge {
            directed: Some(true),
            capacity: Some(4.0),
            ..AddEdge::new("C", "A").weight(2.5)
        };
        let edited = add_edge(&path(), &params).unwrap();
        let added = edited.edges.last().unwrap();

        assert!(added.directed);
        assert_eq!(added.capacity, Some(4.0));
        assert_eq!(added.weight, 2.5);
    }

    #[test]
    fn test_add_edge_unknown_endpoint() {
        let err = add_edge(&path(), &AddEdge::new("A", "Z")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NodeNotFound);
    }

    #[test]
    fn test_delete_node_removes_incident_edges() {
        let edited = delete_node(&path(), "B").unwrap();
        assert_eq!(edited.nodes.len(), 2);
        assert!(edited.edges.is_empty());

        let err = delete_node(&path(), "Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NodeNotFound);
    }

    #[test]
    fn test_delete_edge_either_orientation() {
        let edited = delete_edge(&path(), "C", "B").unwrap();
        assert_eq!(edited.edges.len(), 1);
        assert_eq!(edited.edges[0].target, "B");
    }

    #[test]
    fn test_delete_directed_edge_respects_orientation() {
        let desc = GraphDescription::directed(["A", "B"], [("A", "B", 1.0)]);
        let err = delete_edge(&desc, "B", "A").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EdgeNotFound);
        assert!(delete_edge(&desc, "A", "B").unwrap().edges.is_empty());
    }

    #[test]
    fn test_delete_edge_removes_parallel_edges() {
        let desc = GraphDescription::undirected(["A", "B"], [("A", "B", 1.0), ("B", "A", 3.0)]);
        assert!(delete_edge(&desc, "A", "B").unwrap().edges.is_empty());
    }

    #[test]
    fn test_validate_reports_malformed() {
        let desc = GraphDescription::undirected(["A"], [("A", "B", 1.0)]);
        assert_eq!(validate(&desc).unwrap_err().kind(), ErrorKind::MalformedGraph);
        assert!(validate(&path()).is_ok());
    }
}
