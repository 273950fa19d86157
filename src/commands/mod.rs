//! CLI commands for graphtrace

pub mod algorithm;
pub mod convert;
pub mod dispatch;
pub mod edit;
pub mod input;
pub mod render;
pub mod validate;
