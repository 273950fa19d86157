use serde_json::json;

use graphtrace_core::edit;
use graphtrace_core::error::Result;

use crate::cli::GraphArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::input;
use crate::output_by_format_result;

/// Check a graph payload; an invalid one fails with `MalformedGraph`
pub fn execute(ctx: &CommandContext, args: &GraphArgs) -> Result<()> {
    let desc = input::read_graph(&args.graph)?;
    edit::validate(&desc)?;
    tracing::debug!(nodes = desc.nodes.len(), edges = desc.edges.len(), "graph_valid");

    output_by_format_result!(ctx.format(),
        json => ctx.print_json(&json!({
            "valid": true,
            "graph_type": desc.graph_type,
            "directed": desc.is_directed(),
            "nodes": desc.nodes.len(),
            "edges": desc.edges.len(),
        })),
        human => {
            println!(
                "Valid {} graph: {} nodes, {} edges",
                desc.graph_type,
                desc.nodes.len(),
                desc.edges.len()
            );
        }
    )
}
