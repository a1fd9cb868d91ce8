use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;
use toml::ser::Error as TomlSerError;

/// Result type for core operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while generating a database layer.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// TOML serialization failed.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] TomlSerError),

    /// Required configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model provider encountered an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// Model or agent returned a response that could not be interpreted.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// Building or writing the SQLite database failed outside of the generated SQL.
    #[error("Database error: {0}")]
    Database(String),

    /// The delegated generation agent failed before producing a result.
    #[error("Agent invocation failed: {0}")]
    AgentInvocation(#[source] Box<Error>),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wraps an error raised while invoking the generation agent.
    ///
    /// Errors that are already agent invocation failures are returned unchanged.
    #[must_use]
    pub fn agent_invocation(error: Self) -> Self {
        match error {
            Self::AgentInvocation(_) => error,
            other => Self::AgentInvocation(Box::new(other)),
        }
    }
}
