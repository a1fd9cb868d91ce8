use std::sync::Arc;

use tablesmith_core::{
    DiscoveryReport, Error, ExecutionContext, GenerationOptions, GenerationRequest,
    GenerationResult, ModelFactory, Result,
};

use crate::sqlite_agent::SqliteAgent;

/// Drives one generation agent run per call.
///
/// The client holds no per-run state: every call binds a model and builds a
/// fresh agent.
#[derive(Clone)]
pub struct GenerationAgentClient {
    /// Source of model bindings
    models: Arc<dyn ModelFactory>,
}

impl GenerationAgentClient {
    /// Create a client binding models through `models`.
    pub fn new(models: Arc<dyn ModelFactory>) -> Self {
        Self { models }
    }

    /// Packages the scan and options into a request and awaits the agent.
    ///
    /// No timeout is applied here; the provider's transport owns that policy.
    ///
    /// # Errors
    /// Any binding or agent failure is returned as [`Error::AgentInvocation`].
    pub async fn invoke(
        &self,
        model_name: &str,
        report: &DiscoveryReport,
        options: &GenerationOptions,
        context: &ExecutionContext,
    ) -> Result<GenerationResult> {
        let request = GenerationRequest::new(
            context.project_description.clone(),
            report,
            options,
            context.project_path.clone(),
        );

        let model = self.models.bind(model_name).map_err(Error::agent_invocation)?;
        tracing::info!("Bound model {} via {}", model.model(), model.name());

        let agent = SqliteAgent::new(model);
        agent
            .generate(&request, context)
            .await
            .map_err(Error::agent_invocation)
    }
}
