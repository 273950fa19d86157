//! Request façade
//!
//! One entry point per request: build a fresh [`GraphModel`], run exactly one
//! algorithm against a fresh [`StepRecorder`], and package the outcome. The
//! façade never fails; errors become `success: false` responses carrying the
//! error kind and message.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::convert::{self, Representation, RepresentationFormat};
use crate::description::GraphDescription;
use crate::error::{ErrorReport, GraphError, Result};
use crate::graph::algos;
use crate::graph::model::GraphModel;
use crate::graph::step::{Step, StepRecorder};
use crate::graph::types::AlgorithmResult;

/// Which algorithm to run and its parameters, tagged by `algorithm`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmRequest {
    Bfs {
        start_node: String,
    },
    Dfs {
        start_node: String,
    },
    ShortestPath {
        start_node: String,
        end_node: String,
    },
    Bipartite,
    Prim {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_node: Option<String>,
    },
    Kruskal,
    MaxFlow {
        source_node: String,
        sink_node: String,
    },
    Fleury {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_node: Option<String>,
    },
    Hierholzer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_node: Option<String>,
    },
}

impl AlgorithmRequest {
    /// Wire name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmRequest::Bfs { .. } => "bfs",
            AlgorithmRequest::Dfs { .. } => "dfs",
            AlgorithmRequest::ShortestPath { .. } => "shortest_path",
            AlgorithmRequest::Bipartite => "bipartite",
            AlgorithmRequest::Prim { .. } => "prim",
            AlgorithmRequest::Kruskal => "kruskal",
            AlgorithmRequest::MaxFlow { .. } => "max_flow",
            AlgorithmRequest::Fleury { .. } => "fleury",
            AlgorithmRequest::Hierholzer { .. } => "hierholzer",
        }
    }

    fn execute(&self, graph: &GraphModel, recorder: &mut StepRecorder) -> Result<AlgorithmResult> {
        let result = match self {
            AlgorithmRequest::Bfs { start_node } => {
                AlgorithmResult::Traversal(algos::bfs(graph, start_node, recorder)?)
            }
            AlgorithmRequest::Dfs { start_node } => {
                AlgorithmResult::Traversal(algos::dfs(graph, start_node, recorder)?)
            }
            AlgorithmRequest::ShortestPath {
                start_node,
                end_node,
            } => AlgorithmResult::ShortestPath(algos::dijkstra(
                graph, start_node, end_node, recorder,
            )?),
            AlgorithmRequest::Bipartite => {
                AlgorithmResult::Bipartite(algos::check_bipartite(graph, recorder)?)
            }
            AlgorithmRequest::Prim { start_node } => {
                AlgorithmResult::SpanningTree(algos::prim(graph, start_node.as_deref(), recorder)?)
            }
            AlgorithmRequest::Kruskal => {
                AlgorithmResult::SpanningTree(algos::kruskal(graph, recorder)?)
            }
            AlgorithmRequest::MaxFlow {
                source_node,
                sink_node,
            } => AlgorithmResult::MaxFlow(algos::edmonds_karp(
                graph,
                source_node,
                sink_node,
                recorder,
            )?),
            AlgorithmRequest::Fleury { start_node } => {
                AlgorithmResult::Eulerian(algos::fleury(graph, start_node.as_deref(), recorder)?)
            }
            AlgorithmRequest::Hierholzer { start_node } => AlgorithmResult::Eulerian(
                algos::hierholzer(graph, start_node.as_deref(), recorder)?,
            ),
        };
        Ok(result)
    }
}

/// Outcome of one algorithm request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AlgorithmResult>,
    /// Steps recorded before the algorithm returned, including on failure
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl Response {
    pub fn succeeded(algorithm: &str, result: AlgorithmResult, steps: Vec<Step>) -> Self {
        Self {
            success: true,
            algorithm: algorithm.to_string(),
            result: Some(result),
            steps,
            error: None,
        }
    }

    pub fn failed(algorithm: &str, err: &GraphError, steps: Vec<Step>) -> Self {
        Self {
            success: false,
            algorithm: algorithm.to_string(),
            result: None,
            steps,
            error: Some(err.report()),
        }
    }
}

/// Outcome of one conversion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub success: bool,
    pub from_format: String,
    pub to_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Representation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl ConversionResponse {
    pub fn succeeded(from: impl fmt::Display, to: impl fmt::Display, data: Representation) -> Self {
        Self {
            success: true,
            from_format: from.to_string(),
            to_format: to.to_string(),
            data: Some(data),
            error: None,
        }
    }
}

/// An algorithm's outcome together with every step it recorded
#[derive(Debug)]
pub struct Run {
    pub outcome: Result<AlgorithmResult>,
    /// Kept on failure too, so an interrupted run (a spanning forest that
    /// turns out disconnected, say) can still be replayed
    pub steps: Vec<Step>,
}

/// Run one algorithm, keeping the typed error for callers that need it
pub fn execute(desc: &GraphDescription, request: &AlgorithmRequest) -> Run {
    let graph = match GraphModel::build(desc) {
        Ok(graph) => graph,
        Err(err) => {
            return Run {
                outcome: Err(err),
                steps: Vec::new(),
            }
        }
    };
    let mut recorder = StepRecorder::new();
    let outcome = request.execute(&graph, &mut recorder);
    Run {
        outcome,
        steps: recorder.into_steps(),
    }
}

/// Run one algorithm request against a graph description
#[tracing::instrument(skip(desc, request), fields(algorithm = request.name(), nodes = desc.nodes.len(), edges = desc.edges.len()))]
pub fn run(desc: &GraphDescription, request: &AlgorithmRequest) -> Response {
    let algorithm = request.name();
    let Run { outcome, steps } = execute(desc, request);
    match outcome {
        Ok(result) => {
            tracing::debug!(steps = steps.len(), "request_succeeded");
            Response::succeeded(algorithm, result, steps)
        }
        Err(err) => {
            tracing::debug!(error = %err, kind = err.error_type(), "request_failed");
            Response::failed(algorithm, &err, steps)
        }
    }
}

/// Convert a graph description between representation formats
///
/// Format tags are parsed here so an unknown tag is reported like any other
/// failure, echoing the tags as given.
#[tracing::instrument(skip(desc), fields(nodes = desc.nodes.len()))]
pub fn convert(desc: &GraphDescription, from: &str, to: &str) -> ConversionResponse {
    let outcome = parse_formats(from, to)
        .and_then(|(from, to)| convert::convert_representation(desc, from, to));

    match outcome {
        Ok(data) => ConversionResponse::succeeded(from, to, data),
        Err(err) => {
            tracing::debug!(error = %err, "conversion_failed");
            ConversionResponse {
                success: false,
                from_format: from.to_string(),
                to_format: to.to_string(),
                data: None,
                error: Some(err.report()),
            }
        }
    }
}

fn parse_formats(from: &str, to: &str) -> Result<(RepresentationFormat, RepresentationFormat)> {
    Ok((from.parse()?, to.parse()?))
}
