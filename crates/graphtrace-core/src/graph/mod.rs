//! Graph model, step tracing and algorithms
//!
//! - `model`: adjacency index built from a graph description
//! - `step`: the step recorder and the step schema
//! - `types`: algorithm results shared with callers
//! - `algos`: the algorithms themselves

pub mod algos;
pub mod model;
pub mod step;
pub mod types;

pub use model::{Adjacent, EdgeRecord, GraphModel};
pub use step::{Step, StepAction, StepRecorder};
pub use types::{
    AlgorithmResult, BipartiteResult, Distance, EdgeRef, EulerianResult, FlowEdge, FlowResult,
    PathResult, PathType, SpanningTreeResult, TraversalResult, TreeEdge,
};
