//! Run one algorithm over a graph payload

use std::path::Path;
use std::time::Instant;

use graphtrace_core::engine::{self, AlgorithmRequest, Response, Run};
use graphtrace_core::error::Result;
use graphtrace_core::trace_time;

use crate::cli::OutputFormat;
use crate::commands::dispatch::{trace_command, CommandContext};
use crate::commands::{input, render};
use crate::output_by_format_result;

/// Execute `request` and print its result
///
/// JSON output is the engine response. On failure the error propagates to
/// `main` for reporting; with `--steps` the partial trace is printed first.
pub fn execute(ctx: &CommandContext, graph: &Path, request: &AlgorithmRequest) -> Result<()> {
    let desc = input::read_graph(graph)?;
    trace_command!(ctx, "load_graph");

    let started = Instant::now();
    let Run { outcome, steps } = engine::execute(&desc, request);
    trace_time!(started, "execute_algorithm", algorithm = request.name());

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            tracing::debug!(algorithm = request.name(), steps = steps.len(), error = %err, "algorithm_failed");
            if ctx.format() == OutputFormat::Human && ctx.settings.show_steps {
                render::steps(&steps, ctx.settings.quiet);
            }
            return Err(err);
        }
    };

    tracing::debug!(algorithm = request.name(), steps = steps.len(), "algorithm_succeeded");
    output_by_format_result!(ctx.format(),
        json => ctx.print_json(&Response::succeeded(request.name(), result, steps)),
        human => {
            render::result(&result);
            if ctx.settings.show_steps {
                render::steps(&steps, ctx.settings.quiet);
            }
        }
    )
}
