//! CLI argument parsing for graphtrace
//!
//! Uses clap for argument parsing.
//! Supports global flags: --format, --quiet, --verbose, --config, --pretty, --steps

pub mod args;
pub mod edit;
pub mod format;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{
    ConvertArgs, FlowArgs, GraphArgs, OptionalStartArgs, ShortestPathArgs, StartArgs,
};
pub use edit::EditCommands;
pub use graphtrace_core::format::OutputFormat;
use parse::parse_output_format;

/// Graphtrace - step-traced graph algorithms
#[derive(Parser, Debug)]
#[command(name = "graphtrace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (overrides the config file)
    #[arg(long, global = true, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging and timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `debug`, `graphtrace_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "GRAPHTRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Print one line per recorded step in human output
    #[arg(long, global = true)]
    pub steps: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Breadth-first traversal from a start node
    Bfs(StartArgs),

    /// Depth-first traversal from a start node
    Dfs(StartArgs),

    /// Dijkstra shortest path between two nodes
    ShortestPath(ShortestPathArgs),

    /// Check whether the graph can be two-coloured
    Bipartite(GraphArgs),

    /// Minimum spanning tree with Prim's algorithm
    Prim(OptionalStartArgs),

    /// Minimum spanning tree with Kruskal's algorithm
    Kruskal(GraphArgs),

    /// Maximum flow with Edmonds-Karp
    MaxFlow(FlowArgs),

    /// Eulerian path or circuit with Fleury's algorithm
    Fleury(OptionalStartArgs),

    /// Eulerian path or circuit with Hierholzer's algorithm
    Hierholzer(OptionalStartArgs),

    /// Convert the graph to another representation
    Convert(ConvertArgs),

    /// Check the graph payload without running an algorithm
    Validate(GraphArgs),

    /// Edit the graph and print the result
    Edit {
        #[command(subcommand)]
        command: EditCommands,
    },
}
