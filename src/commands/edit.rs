//! Graph editing commands
//!
//! The edited description is the output: it goes to stdout as JSON, or to
//! `--output` with a short status line in its place.

use serde_json::json;

use graphtrace_core::edit::{self as ops, AddEdge};
use graphtrace_core::error::Result;
use graphtrace_core::GraphDescription;

use crate::cli::edit::{AddEdgeArgs, DeleteEdgeArgs, DeleteNodeArgs, EditOutput};
use crate::commands::dispatch::{trace_command, CommandContext};
use crate::commands::input;
use crate::output_by_format_result;

pub fn add_edge(ctx: &CommandContext, args: &AddEdgeArgs) -> Result<()> {
    let desc = input::read_graph(&args.graph.graph)?;
    trace_command!(ctx, "load_graph");

    let params = AddEdge {
        capacity: args.capacity,
        directed: args.directed.then_some(true),
        ..AddEdge::new(args.source.as_str(), args.target.as_str()).weight(args.weight)
    };
    let edited = ops::add_edge(&desc, &params)?;
    emit(
        ctx,
        &args.out,
        &edited,
        &format!("Added edge {} -> {}", args.source, args.target),
    )
}

pub fn delete_node(ctx: &CommandContext, args: &DeleteNodeArgs) -> Result<()> {
    let desc = input::read_graph(&args.graph.graph)?;
    trace_command!(ctx, "load_graph");

    let edited = ops::delete_node(&desc, &args.node)?;
    emit(ctx, &args.out, &edited, &format!("Deleted node {}", args.node))
}

pub fn delete_edge(ctx: &CommandContext, args: &DeleteEdgeArgs) -> Result<()> {
    let desc = input::read_graph(&args.graph.graph)?;
    trace_command!(ctx, "load_graph");

    let edited = ops::delete_edge(&desc, &args.source, &args.target)?;
    emit(
        ctx,
        &args.out,
        &edited,
        &format!("Deleted edges {} - {}", args.source, args.target),
    )
}

fn emit(
    ctx: &CommandContext,
    out: &EditOutput,
    edited: &GraphDescription,
    summary: &str,
) -> Result<()> {
    let Some(path) = &out.output else {
        return ctx.print_json(edited);
    };

    input::write_text(path, &format!("{}\n", ctx.to_json(edited)?))?;
    output_by_format_result!(ctx.format(),
        json => ctx.print_json(&json!({
            "status": "written",
            "path": path.display().to_string(),
            "nodes": edited.nodes.len(),
            "edges": edited.edges.len(),
        })),
        human => {
            if !ctx.settings.quiet {
                println!(
                    "{} ({} nodes, {} edges) -> {}",
                    summary,
                    edited.nodes.len(),
                    edited.edges.len(),
                    path.display()
                );
            }
        }
    )
}
