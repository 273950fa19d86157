//! Reading and writing graph payloads
//!
//! `-` means stdin. A payload that is not valid JSON for the expected shape
//! is a malformed graph, not an I/O failure.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use graphtrace_core::error::{GraphError, Result};
use graphtrace_core::GraphDescription;

const STDIN: &str = "-";

fn source_name(path: &Path) -> String {
    if path == Path::new(STDIN) {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

/// Read the raw payload text
pub fn read_text(path: &Path) -> Result<String> {
    let text = if path == Path::new(STDIN) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(path).map_err(|e| {
            GraphError::Other(format!("failed to read {}: {}", path.display(), e))
        })?
    };
    debug!(source = %source_name(path), bytes = text.len(), "payload_read");
    Ok(text)
}

/// Parse a payload of any JSON shape
pub fn parse<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|e| GraphError::malformed(format!("{}: {}", source_name(path), e)))
}

/// Read a graph description
pub fn read_graph(path: &Path) -> Result<GraphDescription> {
    let text = read_text(path)?;
    parse(path, &text)
}

/// Write text to a file, creating or truncating it
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)
        .map_err(|e| GraphError::Other(format!("failed to write {}: {}", path.display(), e)))?;
    debug!(path = %path.display(), bytes = text.len(), "payload_written");
    Ok(())
}
