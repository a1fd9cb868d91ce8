//! Provider adapters for external LLM services.
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

/// Canned-response provider for tests.
pub mod mock;
/// OpenAI-compatible chat completion provider.
pub mod openai;

pub use mock::MockProvider;
pub use openai::{OpenAiModelFactory, OpenAiProvider};
