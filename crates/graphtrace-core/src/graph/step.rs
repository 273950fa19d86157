//! Step recording for frame-by-frame replay
//!
//! Every algorithm receives a [`StepRecorder`] by reference and appends one
//! [`Step`] per internal decision. Steps are append-only and numbered from 0,
//! so the sequence is a total order of what the algorithm did. Each step is a
//! full snapshot of the state a visualizer needs for that frame.
//!
//! Field names on the wire follow the frontend contract: `step`, `node`,
//! `edge`, `distance`, `parent`, `mst_edges` and `current_flow`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::types::{Distance, EdgeRef, TreeEdge};

/// What happened in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    /// Node dequeued/popped and marked visited
    Visit,
    /// Neighbor enqueued/pushed onto the frontier
    Discover,
    /// Already-visited node popped and ignored
    Skip,
    /// Node's shortest distance fixed
    Finalize,
    /// Node assigned a colour
    Color,
    /// Edge endpoints share a colour
    Conflict,
    /// Edge added to the spanning tree
    Accept,
    /// Edge discarded (would close a cycle)
    Reject,
    /// Flow pushed along an augmenting path
    Augment,
    /// Precondition evaluated
    Check,
    /// Edge walked and removed (Fleury)
    Traverse,
    /// Edge followed onto the trace stack (Hierholzer)
    Push,
    /// Stuck node popped into the result (Hierholzer)
    Pop,
}

impl StepAction {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            StepAction::Visit => "visit",
            StepAction::Discover => "discover",
            StepAction::Skip => "skip",
            StepAction::Finalize => "finalize",
            StepAction::Color => "color",
            StepAction::Conflict => "conflict",
            StepAction::Accept => "accept",
            StepAction::Reject => "reject",
            StepAction::Augment => "augment",
            StepAction::Check => "check",
            StepAction::Traverse => "traverse",
            StepAction::Push => "push",
            StepAction::Pop => "pop",
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "step")]
    pub index: usize,
    pub action: StepAction,
    #[serde(rename = "node", default, skip_serializing_if = "Option::is_none")]
    pub focus_node: Option<String>,
    #[serde(rename = "edge", default, skip_serializing_if = "Option::is_none")]
    pub focus_edge: Option<EdgeRef>,
    #[serde(default)]
    pub visited: Vec<String>,
    #[serde(default)]
    pub queue: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(rename = "distance", default, skip_serializing_if = "Option::is_none")]
    pub distances: Option<BTreeMap<String, Distance>>,
    #[serde(rename = "parent", default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<BTreeMap<String, Option<String>>>,
    #[serde(rename = "mst_edges", default, skip_serializing_if = "Option::is_none")]
    pub partial_edges: Option<Vec<TreeEdge>>,
    #[serde(rename = "current_flow", default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub description: String,
}

impl Step {
    fn new(index: usize, action: StepAction, description: String) -> Self {
        Self {
            index,
            action,
            focus_node: None,
            focus_edge: None,
            visited: Vec::new(),
            queue: Vec::new(),
            stack: Vec::new(),
            distances: None,
            parents: None,
            partial_edges: None,
            flow: None,
            sets: None,
            path: None,
            amount: None,
            description,
        }
    }

    pub fn node(&mut self, id: impl Into<String>) -> &mut Self {
        self.focus_node = Some(id.into());
        self
    }

    pub fn edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.focus_edge = Some(EdgeRef::new(source, target));
        self
    }

    pub fn visited(&mut self, visited: Vec<String>) -> &mut Self {
        self.visited = visited;
        self
    }

    pub fn queue(&mut self, queue: Vec<String>) -> &mut Self {
        self.queue = queue;
        self
    }

    pub fn stack(&mut self, stack: Vec<String>) -> &mut Self {
        self.stack = stack;
        self
    }

    pub fn distances(&mut self, distances: BTreeMap<String, Distance>) -> &mut Self {
        self.distances = Some(distances);
        self
    }

    pub fn parents(&mut self, parents: BTreeMap<String, Option<String>>) -> &mut Self {
        self.parents = Some(parents);
        self
    }

    pub fn partial_edges(&mut self, edges: Vec<TreeEdge>) -> &mut Self {
        self.partial_edges = Some(edges);
        self
    }

    pub fn flow(&mut self, flow: BTreeMap<String, f64>) -> &mut Self {
        self.flow = Some(flow);
        self
    }

    pub fn sets(&mut self, sets: BTreeMap<String, Vec<String>>) -> &mut Self {
        self.sets = Some(sets);
        self
    }

    pub fn path(&mut self, path: Vec<String>) -> &mut Self {
        self.path = Some(path);
        self
    }

    pub fn amount(&mut self, amount: f64) -> &mut Self {
        self.amount = Some(amount);
        self
    }
}

/// Append-only log of algorithm steps, owned by a single invocation
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and return it for filling in state snapshots
    pub fn record(&mut self, action: StepAction, description: impl Into<String>) -> &mut Step {
        let index = self.steps.len();
        self.steps.push(Step::new(index, action, description.into()));
        &mut self.steps[index]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
