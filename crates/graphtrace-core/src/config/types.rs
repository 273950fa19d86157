//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;

/// User configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging defaults
    #[serde(default)]
    pub log: LogConfig,
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,

    /// Print the step trace in human output
    #[serde(default)]
    pub show_steps: bool,
}

/// `[log]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level or full filter directive (e.g. `debug`, `graphtrace_core=trace`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json: bool,
}
