//! Tool-call infrastructure for the database generator.
//!
//! This crate provides:
//! - the `Tool` trait and its JSON input/output types
//! - `WriteFileTool`, a file writer sandboxed to a project root
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Allow for tests"
    )
)]

/// Sandboxed file writing.
mod file_ops;
/// Core abstractions shared by all tools.
mod tool;

pub use file_ops::{WriteFileTool, normalize_relative};
pub use tool::{Tool, ToolError, ToolInput, ToolOutput, ToolResult};
