//! Error types and exit codes for graphtrace
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, serialization)
//! - 2: Usage error (bad flags/args, unknown representation format)
//! - 3: Graph error (malformed payload or violated algorithm precondition)

mod macros;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exit codes for the graphtrace binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Graph error - malformed graph or failed precondition (3)
    Graph = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Caller-visible error category, reported in failed responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    MalformedGraph,
    EmptyGraph,
    NodeNotFound,
    EdgeNotFound,
    NegativeWeight,
    Disconnected,
    DirectedGraph,
    InvalidEndpoints,
    UnsupportedFormat,
    Usage,
    Internal,
}

/// Errors that can occur while building graphs or running algorithms
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("malformed graph: {reason}")]
    MalformedGraph { reason: String },

    #[error("{algorithm} requires at least one node")]
    EmptyGraph { algorithm: String },

    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("no edge between {from} and {to}")]
    EdgeNotFound { from: String, to: String },

    #[error("negative weight {weight} on edge {from} -> {to} (dijkstra requires non-negative weights)")]
    NegativeWeight { from: String, to: String, weight: f64 },

    #[error("graph is disconnected: spanning tree has {found} of {required} edges")]
    Disconnected { found: usize, required: usize },

    #[error("{algorithm} requires an undirected graph")]
    DirectedGraph { algorithm: String },

    #[error("source and sink must differ (both are {id})")]
    InvalidEndpoints { id: String },

    #[error("unsupported format: {value} (supported: {supported})")]
    UnsupportedFormat { value: String, supported: String },

    #[error("{0}")]
    UsageError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl GraphError {
    /// Create an error for a payload that cannot be turned into a graph
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        GraphError::MalformedGraph {
            reason: reason.to_string(),
        }
    }

    /// Create an error for a referenced node that is not declared
    pub fn node_not_found(id: impl std::fmt::Display) -> Self {
        GraphError::NodeNotFound { id: id.to_string() }
    }

    /// Create an error for an algorithm that needs at least one node
    pub fn empty_graph(algorithm: &str) -> Self {
        GraphError::EmptyGraph {
            algorithm: algorithm.to_string(),
        }
    }

    /// Create an error for an unrecognized format tag
    pub fn unsupported_format(
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        GraphError::UnsupportedFormat {
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Get the caller-visible error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::MalformedGraph { .. } => ErrorKind::MalformedGraph,
            GraphError::EmptyGraph { .. } => ErrorKind::EmptyGraph,
            GraphError::NodeNotFound { .. } => ErrorKind::NodeNotFound,
            GraphError::EdgeNotFound { .. } => ErrorKind::EdgeNotFound,
            GraphError::NegativeWeight { .. } => ErrorKind::NegativeWeight,
            GraphError::Disconnected { .. } => ErrorKind::Disconnected,
            GraphError::DirectedGraph { .. } => ErrorKind::DirectedGraph,
            GraphError::InvalidEndpoints { .. } => ErrorKind::InvalidEndpoints,
            GraphError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            GraphError::UsageError(_) => ErrorKind::Usage,
            GraphError::Io(_) | GraphError::Json(_) | GraphError::Toml(_) | GraphError::Other(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GraphError::UnsupportedFormat { .. } | GraphError::UsageError(_) => ExitCode::Usage,

            GraphError::MalformedGraph { .. }
            | GraphError::EmptyGraph { .. }
            | GraphError::NodeNotFound { .. }
            | GraphError::EdgeNotFound { .. }
            | GraphError::NegativeWeight { .. }
            | GraphError::Disconnected { .. }
            | GraphError::DirectedGraph { .. }
            | GraphError::InvalidEndpoints { .. } => ExitCode::Graph,

            GraphError::Io(_) | GraphError::Json(_) | GraphError::Toml(_) | GraphError::Other(_) => {
                ExitCode::Failure
            }
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GraphError::MalformedGraph { .. } => "malformed_graph",
            GraphError::EmptyGraph { .. } => "empty_graph",
            GraphError::NodeNotFound { .. } => "node_not_found",
            GraphError::EdgeNotFound { .. } => "edge_not_found",
            GraphError::NegativeWeight { .. } => "negative_weight",
            GraphError::Disconnected { .. } => "disconnected",
            GraphError::DirectedGraph { .. } => "directed_graph",
            GraphError::InvalidEndpoints { .. } => "invalid_endpoints",
            GraphError::UnsupportedFormat { .. } => "unsupported_format",
            GraphError::UsageError(_) => "usage_error",
            GraphError::Io(_) => "io_error",
            GraphError::Json(_) => "json_error",
            GraphError::Toml(_) => "toml_error",
            GraphError::Other(_) => "other",
        }
    }

    /// Structured report embedded in failed responses
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "kind": self.kind(),
                "message": self.to_string(),
            }
        })
    }
}

/// Error kind and message carried by a failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

/// Result type alias for graphtrace operations
pub type Result<T> = std::result::Result<T, GraphError>;
