//! Command dispatch logic for graphtrace

use std::time::Instant;

use crate::cli::Cli;
use graphtrace_core::config::Config;
use graphtrace_core::error::Result;
use tracing::debug;

mod command;
mod commands;
mod macros;

pub use command::{Command, CommandContext, NoCommand, Settings};
pub(crate) use macros::trace_command;

pub fn run(cli: &Cli, config: &Config, start: Instant) -> Result<()> {
    let settings = Settings::resolve(cli, config);

    debug!(elapsed = ?start.elapsed(), format = %settings.format, "resolve_settings");

    let ctx = CommandContext::new(cli, settings, start);

    // Execute command
    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
