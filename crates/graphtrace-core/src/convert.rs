//! Graph representation conversion
//!
//! Three interchangeable encodings of the same edge multiset, tagged by
//! `format` on the wire:
//! - `adjacency_matrix`: `nodes` plus a square matrix of weights, `null` where
//!   there is no edge. Parallel edges cannot be represented and collapse to
//!   their minimum weight.
//! - `adjacency_list`: one entry per node listing `(node, weight)` neighbors.
//!   Undirected edges appear under both endpoints.
//! - `edge_list`: `nodes` plus `(source, target, weight)` triples.
//!
//! Conversions go through the edge list, which is the canonical form.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bail_malformed;
use crate::description::{Edge, GraphDescription, GraphKind, Node};
use crate::error::{GraphError, Result};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Representation format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationFormat {
    AdjacencyMatrix,
    AdjacencyList,
    EdgeList,
}

impl RepresentationFormat {
    pub const ALL: [RepresentationFormat; 3] = [
        RepresentationFormat::AdjacencyMatrix,
        RepresentationFormat::AdjacencyList,
        RepresentationFormat::EdgeList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepresentationFormat::AdjacencyMatrix => "adjacency_matrix",
            RepresentationFormat::AdjacencyList => "adjacency_list",
            RepresentationFormat::EdgeList => "edge_list",
        }
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RepresentationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepresentationFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "adjacency_matrix" => Ok(RepresentationFormat::AdjacencyMatrix),
            "adjacency_list" => Ok(RepresentationFormat::AdjacencyList),
            "edge_list" => Ok(RepresentationFormat::EdgeList),
            _ => Err(GraphError::unsupported_format(s, Self::supported())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    pub directed: bool,
    pub nodes: Vec<String>,
    /// `matrix[i][j]` is the weight of the edge from `nodes[i]` to `nodes[j]`
    pub matrix: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: String,
    pub weight: f64,
    /// One-way edge inside an undirected graph
    #[serde(default, skip_serializing_if = "is_false")]
    pub directed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    pub node: String,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyList {
    pub directed: bool,
    pub adjacency: Vec<AdjacencyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub directed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeList {
    pub directed: bool,
    pub nodes: Vec<String>,
    pub edges: Vec<WeightedEdge>,
}

/// A graph in one of the supported encodings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Representation {
    AdjacencyMatrix(AdjacencyMatrix),
    AdjacencyList(AdjacencyList),
    EdgeList(EdgeList),
}

impl Representation {
    pub fn format(&self) -> RepresentationFormat {
        match self {
            Representation::AdjacencyMatrix(_) => RepresentationFormat::AdjacencyMatrix,
            Representation::AdjacencyList(_) => RepresentationFormat::AdjacencyList,
            Representation::EdgeList(_) => RepresentationFormat::EdgeList,
        }
    }

    /// Encode a graph description in `format`
    pub fn from_description(desc: &GraphDescription, format: RepresentationFormat) -> Result<Self> {
        desc.validate()?;
        Ok(EdgeList::from_description(desc).encode(format))
    }

    /// Canonical edge-list view, validating the encoding on the way
    pub fn to_edge_list(&self) -> Result<EdgeList> {
        match self {
            Representation::AdjacencyMatrix(m) => m.to_edge_list(),
            Representation::AdjacencyList(l) => l.to_edge_list(),
            Representation::EdgeList(e) => {
                e.check()?;
                Ok(e.clone())
            }
        }
    }

    pub fn to_description(&self) -> Result<GraphDescription> {
        Ok(self.to_edge_list()?.into_description())
    }
}

impl EdgeList {
    pub fn from_description(desc: &GraphDescription) -> Self {
        let directed = desc.is_directed();
        Self {
            directed,
            nodes: desc.nodes.iter().map(|n| n.id.clone()).collect(),
            edges: desc
                .edges
                .iter()
                .map(|e| WeightedEdge {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    weight: e.weight,
                    directed: !directed && e.directed,
                })
                .collect(),
        }
    }

    pub fn into_description(self) -> GraphDescription {
        GraphDescription {
            nodes: self.nodes.into_iter().map(Node::new).collect(),
            edges: self
                .edges
                .into_iter()
                .map(|e| Edge {
                    directed: e.directed,
                    ..Edge::new(e.source, e.target, e.weight)
                })
                .collect(),
            directed: self.directed,
            graph_type: if self.directed {
                GraphKind::Directed
            } else {
                GraphKind::Undirected
            },
            metadata: None,
        }
    }

    fn check(&self) -> Result<()> {
        let index = node_index(&self.nodes)?;
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint.as_str()) {
                    bail_malformed!("edge list references unknown node '{}'", endpoint);
                }
            }
            check_weight(edge.weight, &edge.source, &edge.target)?;
        }
        Ok(())
    }

    fn one_way(&self, edge: &WeightedEdge) -> bool {
        self.directed || edge.directed
    }

    pub fn encode(self, format: RepresentationFormat) -> Representation {
        match format {
            RepresentationFormat::AdjacencyMatrix => {
                Representation::AdjacencyMatrix(self.to_matrix())
            }
            RepresentationFormat::AdjacencyList => Representation::AdjacencyList(self.to_list()),
            RepresentationFormat::EdgeList => Representation::EdgeList(self),
        }
    }

    fn to_matrix(&self) -> AdjacencyMatrix {
        let n = self.nodes.len();
        let index: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let mut matrix = vec![vec![None; n]; n];

        let mut place = |i: usize, j: usize, weight: f64| {
            let cell: &mut Option<f64> = &mut matrix[i][j];
            *cell = Some(cell.map_or(weight, |w| w.min(weight)));
        };

        for edge in &self.edges {
            let (i, j) = (index[edge.source.as_str()], index[edge.target.as_str()]);
            place(i, j, edge.weight);
            if !self.one_way(edge) && i != j {
                place(j, i, edge.weight);
            }
        }

        AdjacencyMatrix {
            directed: self.directed,
            nodes: self.nodes.clone(),
            matrix,
        }
    }

    fn to_list(&self) -> AdjacencyList {
        let mut adjacency: Vec<AdjacencyEntry> = self
            .nodes
            .iter()
            .map(|id| AdjacencyEntry {
                node: id.clone(),
                neighbors: Vec::new(),
            })
            .collect();
        let index: HashMap<String, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        for edge in &self.edges {
            let (i, j) = (index[&edge.source], index[&edge.target]);
            adjacency[i].neighbors.push(Neighbor {
                node: edge.target.clone(),
                weight: edge.weight,
                directed: edge.directed,
            });
            if !self.one_way(edge) && i != j {
                adjacency[j].neighbors.push(Neighbor {
                    node: edge.source.clone(),
                    weight: edge.weight,
                    directed: false,
                });
            }
        }

        AdjacencyList {
            directed: self.directed,
            adjacency,
        }
    }
}

impl AdjacencyMatrix {
    /// Undirected matrices are read from the upper triangle; a cell whose
    /// mirror differs becomes a one-way edge
    pub fn to_edge_list(&self) -> Result<EdgeList> {
        let n = self.nodes.len();
        node_index(&self.nodes)?;
        if self.matrix.len() != n || self.matrix.iter().any(|row| row.len() != n) {
            bail_malformed!("adjacency matrix must be {}x{} to match its node list", n, n);
        }

        let mut edges = Vec::new();
        let mut push = |i: usize, j: usize, weight: f64, directed: bool| -> Result<()> {
            check_weight(weight, &self.nodes[i], &self.nodes[j])?;
            edges.push(WeightedEdge {
                source: self.nodes[i].clone(),
                target: self.nodes[j].clone(),
                weight,
                directed,
            });
            Ok(())
        };

        for i in 0..n {
            for j in 0..n {
                let Some(weight) = self.matrix[i][j] else {
                    continue;
                };
                if self.directed {
                    push(i, j, weight, false)?;
                } else if i == j {
                    push(i, j, weight, false)?;
                } else if self.matrix[j][i] == Some(weight) {
                    if i < j {
                        push(i, j, weight, false)?;
                    }
                } else {
                    push(i, j, weight, true)?;
                }
            }
        }

        Ok(EdgeList {
            directed: self.directed,
            nodes: self.nodes.clone(),
            edges,
        })
    }
}

impl AdjacencyList {
    /// Undirected neighbors are listed under both endpoints; each pair is
    /// emitted once, where it is first seen. An entry with no mirror of the
    /// same weight under the other endpoint becomes a one-way edge.
    pub fn to_edge_list(&self) -> Result<EdgeList> {
        let nodes: Vec<String> = self.adjacency.iter().map(|e| e.node.clone()).collect();
        let index = node_index(&nodes)?;

        let mut edges: Vec<WeightedEdge> = Vec::new();
        // (source, target) -> emitted edges still waiting for their mirror
        let mut unpaired: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for (i, entry) in self.adjacency.iter().enumerate() {
            for neighbor in &entry.neighbors {
                let Some(&j) = index.get(neighbor.node.as_str()) else {
                    bail_malformed!(
                        "adjacency list entry '{}' references unknown node '{}'",
                        entry.node,
                        neighbor.node
                    );
                };
                check_weight(neighbor.weight, &entry.node, &neighbor.node)?;

                let paired = !(self.directed || neighbor.directed) && i != j;
                if paired {
                    let waiting = unpaired.entry((j, i)).or_default();
                    let mirror = waiting
                        .iter()
                        .position(|&e| edges[e].weight == neighbor.weight);
                    if let Some(pos) = mirror {
                        waiting.remove(pos);
                        continue;
                    }
                    unpaired.entry((i, j)).or_default().push(edges.len());
                }
                edges.push(WeightedEdge {
                    source: entry.node.clone(),
                    target: neighbor.node.clone(),
                    weight: neighbor.weight,
                    directed: !self.directed && neighbor.directed,
                });
            }
        }

        for edge in unpaired.into_values().flatten() {
            edges[edge].directed = true;
        }

        Ok(EdgeList {
            directed: self.directed,
            nodes,
            edges,
        })
    }
}

fn node_index(nodes: &[String]) -> Result<HashMap<&str, usize>> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, id) in nodes.iter().enumerate() {
        if index.insert(id.as_str(), i).is_some() {
            bail_malformed!("duplicate node id '{}'", id);
        }
    }
    Ok(index)
}

fn check_weight(weight: f64, source: &str, target: &str) -> Result<()> {
    if !weight.is_finite() {
        bail_malformed!("edge {} -> {} has a non-finite weight", source, target);
    }
    Ok(())
}

/// Convert an already-encoded graph into `to`
pub fn convert(representation: &Representation, to: RepresentationFormat) -> Result<Representation> {
    Ok(representation.to_edge_list()?.encode(to))
}

/// Encode `desc` as `from`, then convert that encoding to `to`
#[tracing::instrument(skip(desc), fields(from = %from, to = %to, nodes = desc.nodes.len()))]
pub fn convert_representation(
    desc: &GraphDescription,
    from: RepresentationFormat,
    to: RepresentationFormat,
) -> Result<Representation> {
    let source = Representation::from_description(desc, from)?;
    let converted = convert(&source, to)?;
    tracing::debug!(edges = desc.edges.len(), "conversion_complete");
    Ok(converted)
}
