//! Graph Description payload types
//!
//! This is the externally supplied shape of a graph: ordered nodes, ordered
//! edges and directedness flags. Callers deserialize it from their own wire
//! format; the engine only ever reads it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bail_malformed;
use crate::error::Result;

fn default_weight() -> f64 {
    1.0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Kind tag attached to a graph description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    #[default]
    Undirected,
    Directed,
    Flow,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Undirected => write!(f, "undirected"),
            GraphKind::Directed => write!(f, "directed"),
            GraphKind::Flow => write!(f, "flow"),
        }
    }
}

/// A vertex of the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lat: None,
            lon: None,
            label: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }
}

/// An edge of the graph
///
/// `directed` marks a single one-way edge and is independent of the
/// graph-level flag, so an undirected graph may contain one-way streets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub directed: bool,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            capacity: None,
            directed: false,
        }
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn one_way(mut self) -> Self {
        self.directed = true;
        self
    }
}

/// Complete graph payload supplied on every call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub graph_type: GraphKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GraphDescription {
    /// Build an undirected description from node ids and `(source, target, weight)` triples
    pub fn undirected<'a>(
        nodes: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str, f64)>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().map(Node::new).collect(),
            edges: edges
                .into_iter()
                .map(|(s, t, w)| Edge::new(s, t, w))
                .collect(),
            ..Default::default()
        }
    }

    /// Build a directed description from node ids and `(source, target, weight)` triples
    pub fn directed<'a>(
        nodes: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str, f64)>,
    ) -> Self {
        Self {
            directed: true,
            graph_type: GraphKind::Directed,
            ..Self::undirected(nodes, edges)
        }
    }

    /// Whether edges are indexed one-way (graph-level flag or a directed/flow kind)
    pub fn is_directed(&self) -> bool {
        self.directed || self.graph_type != GraphKind::Undirected
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Check that node ids are unique and every edge endpoint is declared
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                bail_malformed!("duplicate node id '{}'", node.id);
            }
        }

        for (position, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    bail_malformed!(
                        "edge #{} ({} -> {}) references unknown node '{}'",
                        position,
                        edge.source,
                        edge.target,
                        endpoint
                    );
                }
            }
            if !edge.weight.is_finite() {
                bail_malformed!(
                    "edge #{} ({} -> {}) has a non-finite weight",
                    position,
                    edge.source,
                    edge.target
                );
            }
        }

        Ok(())
    }
}
