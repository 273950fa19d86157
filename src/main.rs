//! Graphtrace - step-traced graph algorithms
//!
//! Reads a graph description as JSON, runs one algorithm (or a conversion or
//! edit) and prints the result with its step trace.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use commands::dispatch::Settings;
use graphtrace_core::config::Config;
use graphtrace_core::error::{ExitCode as GraphExitCode, GraphError};
use graphtrace_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let argv_format_json = argv_requests_json();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `--format` is a global flag, but clap may fail parsing before we can
            // inspect `Cli.format`. If the user requested JSON output, emit a
            // structured error envelope.
            if argv_format_json {
                let graph_error = match err.kind() {
                    // Help and version are informational, not errors - let clap handle them
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    clap::error::ErrorKind::ValueValidation
                    | clap::error::ErrorKind::InvalidValue
                    | clap::error::ErrorKind::InvalidSubcommand
                    | clap::error::ErrorKind::UnknownArgument
                    | clap::error::ErrorKind::MissingRequiredArgument
                    | clap::error::ErrorKind::ArgumentConflict => {
                        GraphError::UsageError(err.to_string())
                    }
                    _ => GraphError::Other(err.to_string()),
                };

                return report(&graph_error, true, false);
            }

            err.exit();
        }
    };

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e, cli.format == Some(OutputFormat::Json), cli.quiet),
    };

    // Initialize structured logging; flags win over the config file
    let log_level = cli.log_level.clone().or_else(|| config.log.level.clone());
    if let Err(e) = logging::init_tracing(
        cli.verbose,
        log_level.as_deref(),
        cli.log_json || config.log.json,
    ) {
        // If tracing initialization fails, fall back to stderr
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, &config, start) {
        Ok(()) => ExitCode::from(GraphExitCode::Success as u8),
        Err(e) => {
            let settings = Settings::resolve(&cli, &config);
            report(&e, settings.format == OutputFormat::Json, settings.quiet)
        }
    }
}

fn report(err: &GraphError, json: bool, quiet: bool) -> ExitCode {
    if json {
        eprintln!("{}", err.to_json());
    } else if !quiet {
        eprintln!("error: {}", err);
    }
    ExitCode::from(err.exit_code() as u8)
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
