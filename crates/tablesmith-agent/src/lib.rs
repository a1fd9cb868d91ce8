//! Orchestration of database-layer generation for web projects.
//!
//! The pipeline resolves its dependencies from an [`ExecutionContext`], scans
//! the project's pages, hands everything to a model-backed SQLite agent and
//! turns the agent's result into one descriptive message.
//!
//! [`ExecutionContext`]: tablesmith_core::ExecutionContext
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

/// Generation agent client.
pub mod client;
/// Rendering of generation results.
pub mod materializer;
/// Pipeline entry point.
pub mod orchestrator;
/// Dependency resolution from the execution context.
pub mod resolver;
/// Model-backed SQLite generation agent.
pub mod sqlite_agent;
/// Tool-call surface for the pipeline.
pub mod tool;

pub use client::GenerationAgentClient;
pub use materializer::materialize;
pub use orchestrator::{DatabasePipeline, PipelineOutcome, PipelineStage};
pub use resolver::{
    ResolvedDependencies, resolve, resolve_database_name, resolve_model_name, resolve_project_path,
};
pub use sqlite_agent::SqliteAgent;
pub use tool::GenerateDatabaseTool;
