use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tablesmith_context::{ContextScanner, DEFAULT_PAGES_DIR};
use tablesmith_core::{Error, ExecutionContext, GenerationOptions, ModelFactory, Result};

use crate::client::GenerationAgentClient;
use crate::materializer::{failure_message, materialize};
use crate::resolver::resolve;

/// Progress points of a pipeline run, reported through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Run accepted
    Start,
    /// Project path known
    PathResolved,
    /// Model identifier known
    ModelResolved,
    /// Pages discovered
    Scanned,
    /// Agent returned a result
    AgentInvoked,
    /// Outcome rendered
    Done,
    /// Run ended early with a failure outcome or an error
    Error,
}

impl PipelineStage {
    /// Short lowercase label used in log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PathResolved => "path_resolved",
            Self::ModelResolved => "model_resolved",
            Self::Scanned => "scanned",
            Self::AgentInvoked => "agent_invoked",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final word of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Whether the database layer was generated
    pub success: bool,
    /// Human-readable summary
    pub message: String,
}

impl PipelineOutcome {
    fn failure(reason: &str) -> Self {
        Self {
            success: false,
            message: failure_message(reason),
        }
    }
}

impl fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Resolves, scans, invokes the agent and materializes its result.
pub struct DatabasePipeline {
    client: GenerationAgentClient,
    pages_dir: String,
}

impl DatabasePipeline {
    /// Create a pipeline binding models through `models`.
    pub fn new(models: Arc<dyn ModelFactory>) -> Self {
        Self {
            client: GenerationAgentClient::new(models),
            pages_dir: DEFAULT_PAGES_DIR.to_owned(),
        }
    }

    /// Scan `pages_dir` (relative to the project root) instead of `pages`.
    #[must_use]
    pub fn with_pages_dir(mut self, pages_dir: impl Into<String>) -> Self {
        self.pages_dir = pages_dir.into();
        self
    }

    /// Run one generation for the project described by `context`.
    ///
    /// Missing or invalid configuration (project path, model, database name) is
    /// reported as an unsuccessful outcome before the project is read.
    ///
    /// # Errors
    /// Returns an error if the pages cannot be scanned or the agent invocation
    /// fails.
    #[tracing::instrument(skip_all, fields(project = %context.project_path.display()))]
    pub async fn run(
        &self,
        context: &ExecutionContext,
        options: &GenerationOptions,
    ) -> Result<PipelineOutcome> {
        report(PipelineStage::Start);

        let deps = match resolve(context, options) {
            Ok(deps) => deps,
            Err(Error::Config(reason)) => {
                tracing::warn!(stage = %PipelineStage::Error, "{reason}");
                return Ok(PipelineOutcome::failure(&reason));
            }
            Err(err) => return Err(err),
        };
        tracing::info!(stage = %PipelineStage::PathResolved, path = %deps.project_path.display());
        tracing::info!(
            stage = %PipelineStage::ModelResolved,
            model = %deps.model_name,
            database = %deps.database_name
        );
        let options = GenerationOptions {
            database_name: deps.database_name.clone(),
            ..options.clone()
        };

        let scanner = ContextScanner::new(&deps.project_path).with_pages_dir(self.pages_dir.as_str());
        let discovery = scanner.scan().inspect_err(|err| {
            tracing::error!(stage = %PipelineStage::Error, "Scan failed: {err}");
        })?;
        tracing::info!(
            stage = %PipelineStage::Scanned,
            routes = discovery.routes.len(),
            readable = discovery.contents.len()
        );

        let result = self
            .client
            .invoke(&deps.model_name, &discovery, &options, context)
            .await
            .inspect_err(|err| {
                tracing::error!(stage = %PipelineStage::Error, "{err}");
            })?;
        tracing::info!(
            stage = %PipelineStage::AgentInvoked,
            success = result.success,
            files = result.created_files.len()
        );

        let outcome = PipelineOutcome {
            success: result.success,
            message: materialize(&result),
        };
        report(PipelineStage::Done);
        Ok(outcome)
    }
}

fn report(stage: PipelineStage) {
    tracing::info!(stage = %stage, "Database pipeline {stage}");
}
