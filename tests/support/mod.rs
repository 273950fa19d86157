use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::{json, Value};

/// Get a Command for graphtrace, isolated from the user's config and log env
pub fn graphtrace() -> Command {
    let mut cmd = cargo_bin_cmd!("graphtrace");
    cmd.env("GRAPHTRACE_CONFIG_DIR", "/nonexistent/graphtrace-tests")
        .env_remove("GRAPHTRACE_CONFIG")
        .env_remove("GRAPHTRACE_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Square A-B-C-D with weights 1, 2, 1 and a heavy A-D diagonal of 4
pub fn square() -> Value {
    json!({
        "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}, {"id": "D"}],
        "edges": [
            {"source": "A", "target": "B", "weight": 1.0},
            {"source": "B", "target": "C", "weight": 2.0},
            {"source": "C", "target": "D", "weight": 1.0},
            {"source": "A", "target": "D", "weight": 4.0}
        ],
        "directed": false
    })
}

/// Five-edge flow network whose maximum flow is 5
#[allow(dead_code)]
pub fn flow_network() -> Value {
    json!({
        "nodes": [{"id": "S"}, {"id": "A"}, {"id": "B"}, {"id": "T"}],
        "edges": [
            {"source": "S", "target": "A", "capacity": 3.0},
            {"source": "A", "target": "T", "capacity": 2.0},
            {"source": "S", "target": "B", "capacity": 2.0},
            {"source": "B", "target": "T", "capacity": 3.0},
            {"source": "A", "target": "B", "capacity": 1.0}
        ],
        "directed": true,
        "graph_type": "flow"
    })
}

/// Write a payload to `<dir>/<name>` and return its path
pub fn write_graph(dir: &Path, name: &str, graph: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, graph.to_string()).unwrap();
    path
}

/// Parse command stdout as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
