use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tentative or final path length
///
/// Unreachable nodes carry an infinite distance. JSON has no infinity, so
/// infinite values serialize as the string `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);
    pub const INFINITY: Distance = Distance(f64::INFINITY);

    pub fn new(value: f64) -> Self {
        Distance(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Total order used by priority queues
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::INFINITY
    }
}

impl std::ops::Add<f64> for Distance {
    type Output = Self;

    fn add(self, weight: f64) -> Self {
        Distance(self.0 + weight)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "∞")
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_finite() {
            serializer.serialize_f64(self.0)
        } else {
            serializer.serialize_str("Infinity")
        }
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Distance(value)),
            Raw::Text(text) if text == "Infinity" => Ok(Distance::INFINITY),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "invalid distance '{}'",
                text
            ))),
        }
    }
}

/// Endpoints of an edge as seen by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub source: String,
    pub target: String,
}

impl EdgeRef {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Weighted edge of a spanning tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Final flow on an input edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub flow: f64,
    pub capacity: f64,
}

/// Visit order produced by BFS or DFS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    pub order: Vec<String>,
    pub count: usize,
}

/// Shortest path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node sequence from start to end, absent when unreachable
    pub path: Option<Vec<String>>,
    pub distance: Distance,
}

/// Outcome of the two-colouring check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipartiteResult {
    pub is_bipartite: bool,
    /// Colour 0 class (empty when not bipartite)
    pub set_a: Vec<String>,
    /// Colour 1 class (empty when not bipartite)
    pub set_b: Vec<String>,
    /// Colours assigned before the check finished
    pub coloring: BTreeMap<String, u8>,
    /// The edge whose endpoints share a colour, when one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<EdgeRef>,
    /// Set when a directed graph was coloured over its undirected view
    pub treated_as_undirected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTreeResult {
    pub edges: Vec<TreeEdge>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub max_flow: f64,
    pub flow_edges: Vec<FlowEdge>,
}

/// Shape of an Eulerian trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Circuit,
    Path,
    None,
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathType::Circuit => write!(f, "circuit"),
            PathType::Path => write!(f, "path"),
            PathType::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerianResult {
    pub has_eulerian_path: bool,
    pub has_eulerian_circuit: bool,
    pub path: Option<Vec<String>>,
    pub path_type: PathType,
    /// Edges in traversal order
    pub edges: Vec<EdgeRef>,
}

impl EulerianResult {
    /// Negative answer: no trail uses every edge exactly once
    pub fn none() -> Self {
        Self {
            has_eulerian_path: false,
            has_eulerian_circuit: false,
            path: None,
            path_type: PathType::None,
            edges: Vec::new(),
        }
    }
}

/// Result of any algorithm, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlgorithmResult {
    Traversal(TraversalResult),
    ShortestPath(PathResult),
    Bipartite(BipartiteResult),
    SpanningTree(SpanningTreeResult),
    MaxFlow(FlowResult),
    Eulerian(EulerianResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_addition() {
        let d = Distance::ZERO + 1.5 + 2.0;
        assert_eq!(d.value(), 3.5);
        assert!(d.is_finite());
    }

    #[test]
    fn test_distance_infinity_serializes_as_string() {
        let json = serde_json::to_string(&Distance::INFINITY).unwrap();
        assert_eq!(json, "\"Infinity\"");
        let back: Distance = serde_json::from_str(&json).unwrap();
        assert!(!back.is_finite());
    }

    #[test]
    fn test_distance_finite_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Distance::new(3.0)).unwrap(), "3.0");
        assert!(serde_json::from_str::<Distance>("\"far\"").is_err());
    }

    #[test]
    fn test_distance_ordering() {
        assert!(Distance::new(1.0) < Distance::INFINITY);
        assert_eq!(
            Distance::new(2.0).total_cmp(&Distance::new(1.0)),
            std::cmp::Ordering::Greater
        );
    }

    #[test]
    fn test_algorithm_result_is_tagged() {
        let result = AlgorithmResult::Traversal(TraversalResult {
            order: vec!["A".into()],
            count: 1,
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "traversal");
        assert_eq!(json["count"], 1);
    }

    #[test]
    fn test_path_type_wire_names() {
        assert_eq!(serde_json::to_string(&PathType::Path).unwrap(), "\"path\"");
        assert_eq!(PathType::Circuit.to_string(), "circuit");
    }
}
