use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::args::GraphArgs;

#[derive(Subcommand, Debug)]
pub enum EditCommands {
    /// Add an edge between two existing nodes
    AddEdge(AddEdgeArgs),

    /// Remove a node and every edge touching it
    DeleteNode(DeleteNodeArgs),

    /// Remove every edge between two nodes
    DeleteEdge(DeleteEdgeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EditOutput {
    /// Write the edited graph here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AddEdgeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub out: EditOutput,

    /// Source node
    #[arg(long)]
    pub source: String,

    /// Target node
    #[arg(long)]
    pub target: String,

    /// Edge weight
    #[arg(long, default_value_t = 1.0)]
    pub weight: f64,

    /// Flow capacity (defaults to the weight)
    #[arg(long)]
    pub capacity: Option<f64>,

    /// Make the edge one-way in an undirected graph
    #[arg(long)]
    pub directed: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteNodeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub out: EditOutput,

    /// Node to remove
    #[arg(long)]
    pub node: String,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteEdgeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub out: EditOutput,

    /// Source node
    #[arg(long)]
    pub source: String,

    /// Target node
    #[arg(long)]
    pub target: String,
}
