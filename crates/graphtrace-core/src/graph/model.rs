//! Algorithm-facing adjacency structure
//!
//! A `GraphModel` is built fresh from a [`GraphDescription`] for every call and
//! is never shared. Nodes and edges are addressed by their position in the
//! input, which keeps every traversal order tied to input order.

use std::collections::HashMap;

use crate::description::{GraphDescription, Node};
use crate::error::{GraphError, Result};

/// One entry of a node's adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    /// Index of the neighboring node
    pub node: usize,
    /// Index of the edge in input order
    pub edge: usize,
}

/// An input edge with endpoints resolved to node indices
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    pub capacity: Option<f64>,
    /// Effective one-way flag (graph-level or per-edge)
    pub directed: bool,
}

impl EdgeRecord {
    /// Flow capacity; falls back to the weight when none was given
    pub fn capacity(&self) -> f64 {
        self.capacity.unwrap_or(self.weight)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone)]
pub struct GraphModel {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<EdgeRecord>,
    adjacency: Vec<Vec<Adjacent>>,
    /// Every edge from both endpoints, ignoring direction
    undirected: Vec<Vec<Adjacent>>,
    directed: bool,
}

impl GraphModel {
    /// Build the adjacency index for a description
    ///
    /// Undirected graphs index each edge from both endpoints unless the edge
    /// itself is one-way; directed graphs index source → target only.
    #[tracing::instrument(skip(desc), fields(nodes = desc.nodes.len(), edges = desc.edges.len(), directed = desc.is_directed()))]
    pub fn build(desc: &GraphDescription) -> Result<Self> {
        desc.validate()?;

        let directed = desc.is_directed();
        let index: HashMap<String, usize> = desc
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let mut adjacency = vec![Vec::new(); desc.nodes.len()];
        let mut undirected = vec![Vec::new(); desc.nodes.len()];
        let mut edges = Vec::with_capacity(desc.edges.len());

        for (edge_id, edge) in desc.edges.iter().enumerate() {
            let source = index[&edge.source];
            let target = index[&edge.target];
            let one_way = directed || edge.directed;

            adjacency[source].push(Adjacent {
                node: target,
                edge: edge_id,
            });
            if !one_way && source != target {
                adjacency[target].push(Adjacent {
                    node: source,
                    edge: edge_id,
                });
            }

            undirected[source].push(Adjacent {
                node: target,
                edge: edge_id,
            });
            if source != target {
                undirected[target].push(Adjacent {
                    node: source,
                    edge: edge_id,
                });
            }

            edges.push(EdgeRecord {
                source,
                target,
                weight: edge.weight,
                capacity: edge.capacity,
                directed: one_way,
            });
        }

        tracing::debug!(nodes = desc.nodes.len(), edges = edges.len(), "graph_model_built");

        Ok(Self {
            nodes: desc.nodes.clone(),
            index,
            edges,
            adjacency,
            undirected,
            directed,
        })
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn edge(&self, edge: usize) -> &EdgeRecord {
        &self.edges[edge]
    }

    /// Identifier of the node at `index`
    pub fn id(&self, index: usize) -> &str {
        &self.nodes[index].id
    }

    pub fn ids<'a>(&'a self, indices: impl IntoIterator<Item = &'a usize>) -> Vec<String> {
        indices.into_iter().map(|&i| self.id(i).to_string()).collect()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolve an identifier or fail with `NodeNotFound`
    pub fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id).ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Fail with `EmptyGraph` when there is nothing to run on
    pub fn require_nodes(&self, algorithm: &str) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(GraphError::empty_graph(algorithm));
        }
        Ok(())
    }

    /// Outgoing adjacency in input edge order
    pub fn neighbors(&self, node: usize) -> &[Adjacent] {
        &self.adjacency[node]
    }

    /// Adjacency ignoring every direction flag
    ///
    /// Used by algorithms that operate on the underlying undirected graph.
    /// For undirected models without one-way edges this equals `neighbors`.
    pub fn undirected_neighbors(&self, node: usize) -> &[Adjacent] {
        &self.undirected[node]
    }

    /// `"source->target"` label for an edge, used as a key in step flow maps
    pub fn edge_label(&self, edge: usize) -> String {
        let e = &self.edges[edge];
        format!("{}->{}", self.id(e.source), self.id(e.target))
    }
}
