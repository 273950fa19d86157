//! Representation conversion
//!
//! The input is either a graph description, read as `--from` (edge list by
//! default), or a representation payload tagged with `format`, in which case
//! its own tag is authoritative.

use graphtrace_core::bail_usage;
use graphtrace_core::convert::{self, Representation, RepresentationFormat};
use graphtrace_core::engine::ConversionResponse;
use graphtrace_core::error::Result;
use graphtrace_core::GraphDescription;

use crate::cli::ConvertArgs;
use crate::commands::dispatch::{trace_command, CommandContext};
use crate::commands::{input, render};
use crate::output_by_format_result;

const FORMAT_TAG: &str = "format";

pub fn execute(ctx: &CommandContext, args: &ConvertArgs) -> Result<()> {
    let to: RepresentationFormat = args.to.parse()?;
    let requested_from = args
        .from
        .as_deref()
        .map(str::parse::<RepresentationFormat>)
        .transpose()?;

    let path = args.graph.graph.as_path();
    let text = input::read_text(path)?;
    let payload: serde_json::Value = input::parse(path, &text)?;
    trace_command!(ctx, "load_graph");

    let (from, data) = if payload.get(FORMAT_TAG).is_some() {
        let rep: Representation = input::parse(path, &text)?;
        if let Some(requested) = requested_from.filter(|f| *f != rep.format()) {
            bail_usage!(
                "--from {} does not match the payload format {}",
                requested,
                rep.format()
            );
        }
        (rep.format(), convert::convert(&rep, to)?)
    } else {
        let desc: GraphDescription = input::parse(path, &text)?;
        let from = requested_from.unwrap_or(RepresentationFormat::EdgeList);
        (from, convert::convert_representation(&desc, from, to)?)
    };

    tracing::debug!(%from, %to, "converted");
    output_by_format_result!(ctx.format(),
        json => ctx.print_json(&ConversionResponse::succeeded(from, to, data)),
        human => { render::representation(&data); }
    )
}
