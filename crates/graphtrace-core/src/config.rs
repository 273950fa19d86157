//! User configuration for graphtrace
//!
//! Configuration lives in `config.toml`, looked up in this order:
//! 1. an explicit path (the `--config` flag)
//! 2. `$GRAPHTRACE_CONFIG_DIR/config.toml`
//! 3. `<platform config dir>/graphtrace/config.toml`
//!
//! A missing file at 2 or 3 yields the defaults; a missing explicit file is
//! an error. Command-line flags override whatever is loaded here.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GraphError, Result};

pub use types::{Config, LogConfig, OutputConfig};

const CONFIG_DIR: &str = "graphtrace";
const CONFIG_FILE: &str = "config.toml";
pub const CONFIG_DIR_ENV_VAR: &str = "GRAPHTRACE_CONFIG_DIR";

impl Config {
    /// Path of the implicit configuration file
    pub fn default_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    GraphError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load from `explicit` when given, else from the implicit location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config_not_found_using_defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GraphError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }
}
