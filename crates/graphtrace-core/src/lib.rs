//! Graphtrace Core Library
//!
//! Step-recording graph algorithms for visualization. Each call takes a
//! complete [`GraphDescription`], builds a fresh [`graph::GraphModel`], runs
//! one algorithm and returns its result together with the ordered trace of
//! internal decisions.

pub mod config;
pub mod convert;
pub mod description;
pub mod edit;
pub mod engine;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;

pub use description::{Edge, GraphDescription, GraphKind, Node};
pub use engine::{AlgorithmRequest, ConversionResponse, Response};
pub use error::{GraphError, Result};
