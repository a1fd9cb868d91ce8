//! Core types and traits for the tablesmith database generator.
//!
//! This crate provides the execution context, the data model passed between
//! pipeline stages, error handling, configuration and the model-provider
//! abstractions shared by every other crate in the workspace.
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

/// Configuration loading and persistence.
pub mod config;
/// Execution context handed to the pipeline by its caller.
pub mod context;
/// Error types and result definitions.
pub mod error;
/// Discovery, request and result types exchanged with the generation agent.
pub mod generation;
/// Synchronization helpers.
pub mod sync;
/// Trait definitions for model providers.
pub mod traits;
/// Query, response and prompt-context types.
pub mod types;

pub use config::{GenerationDefaults, ProviderConfig, ScanConfig, TablesmithConfig};
pub use context::{ExecutionContext, ModelSource, NamedModel};
pub use error::{Error, Result};
pub use generation::{
    DEFAULT_DATABASE_NAME, DiscoveryReport, GenerationOptions, GenerationRequest,
    GenerationResult,
};
pub use sync::IgnoreLock;
pub use traits::{ModelFactory, ModelProvider};
pub use types::{Context, FileContext, Query, Response, TokenUsage};
