//! Command trait and context for dispatching commands

use std::time::Instant;

use serde::Serialize;

use crate::cli::{Cli, OutputFormat};
use graphtrace_core::config::Config;
use graphtrace_core::error::Result;

/// Output settings after merging CLI flags over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub pretty: bool,
    pub show_steps: bool,
    pub quiet: bool,
}

impl Settings {
    /// Flags win; a flag that is off leaves the config value in place
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            format: cli.format.unwrap_or(config.output.format),
            pretty: cli.pretty || config.output.pretty,
            show_steps: cli.steps || config.output.show_steps,
            quiet: cli.quiet,
        }
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub settings: Settings,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, settings: Settings, start: Instant) -> Self {
        Self {
            cli,
            settings,
            start,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.settings.format
    }

    /// Print a value as JSON on stdout, pretty when requested
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.to_json(value)?);
        Ok(())
    }

    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = if self.settings.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("graphtrace {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Step-traced graph algorithms for visualization tooling.");
        println!();
        println!("Run `graphtrace --help` for usage information.");
        Ok(())
    }
}
