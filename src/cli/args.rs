use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph description JSON file, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    pub graph: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Node to start from
    #[arg(long, short)]
    pub start: String,
}

#[derive(Args, Debug, Clone)]
pub struct OptionalStartArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Node to start from (defaults to the first suitable node)
    #[arg(long, short)]
    pub start: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ShortestPathArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Start node
    #[arg(long, short)]
    pub start: String,

    /// End node
    #[arg(long, short)]
    pub end: String,
}

#[derive(Args, Debug, Clone)]
pub struct FlowArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Source node
    #[arg(long)]
    pub source: String,

    /// Sink node
    #[arg(long)]
    pub sink: String,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Representation the input is read as (defaults to edge_list)
    #[arg(long)]
    pub from: Option<String>,

    /// Representation to produce: adjacency_matrix, adjacency_list or edge_list
    #[arg(long)]
    pub to: String,
}
