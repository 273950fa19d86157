//! Command implementations for all graphtrace commands

use crate::cli::{Commands, EditCommands};
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{algorithm, convert, edit, validate};
use graphtrace_core::engine::AlgorithmRequest;
use graphtrace_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Convert(args) => convert::execute(ctx, args),
            Commands::Validate(args) => validate::execute(ctx, args),
            Commands::Edit { command } => command.execute(ctx),
            algorithmic => {
                let (graph, request) = algorithm_request(algorithmic)?;
                algorithm::execute(ctx, graph, &request)
            }
        }
    }
}

impl Command for EditCommands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            EditCommands::AddEdge(args) => edit::add_edge(ctx, args),
            EditCommands::DeleteNode(args) => edit::delete_node(ctx, args),
            EditCommands::DeleteEdge(args) => edit::delete_edge(ctx, args),
        }
    }
}

/// Graph input path and engine request for an algorithm subcommand
fn algorithm_request(cmd: &Commands) -> Result<(&std::path::Path, AlgorithmRequest)> {
    let pair = match cmd {
        Commands::Bfs(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::Bfs {
                start_node: args.start.clone(),
            },
        ),
        Commands::Dfs(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::Dfs {
                start_node: args.start.clone(),
            },
        ),
        Commands::ShortestPath(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::ShortestPath {
                start_node: args.start.clone(),
                end_node: args.end.clone(),
            },
        ),
        Commands::Bipartite(args) => (args.graph.as_path(), AlgorithmRequest::Bipartite),
        Commands::Prim(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::Prim {
                start_node: args.start.clone(),
            },
        ),
        Commands::Kruskal(args) => (args.graph.as_path(), AlgorithmRequest::Kruskal),
        Commands::MaxFlow(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::MaxFlow {
                source_node: args.source.clone(),
                sink_node: args.sink.clone(),
            },
        ),
        Commands::Fleury(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::Fleury {
                start_node: args.start.clone(),
            },
        ),
        Commands::Hierholzer(args) => (
            args.graph.graph.as_path(),
            AlgorithmRequest::Hierholzer {
                start_node: args.start.clone(),
            },
        ),
        Commands::Convert(_) | Commands::Validate(_) | Commands::Edit { .. } => {
            return Err(graphtrace_core::GraphError::Other(
                "not an algorithm command".to_string(),
            ))
        }
    };
    Ok(pair)
}
