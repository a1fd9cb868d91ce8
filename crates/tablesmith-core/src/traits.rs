use std::sync::Arc;

use async_trait::async_trait;

use crate::{Context, Query, Response, Result};

/// Trait for AI model providers that can generate responses to queries.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the unique identifier for this provider.
    fn name(&self) -> &'static str;

    /// Returns the identifier of the model requests are sent to.
    fn model(&self) -> &str;

    /// Generates a response to the given query using the provided context.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unavailable, the request fails,
    /// or the response cannot be parsed.
    async fn generate(&self, query: &Query, context: &Context) -> Result<Response>;
}

/// Builds model bindings from bare model identifiers.
pub trait ModelFactory: Send + Sync {
    /// Binds a provider to `model_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the binding cannot be constructed, for example
    /// because no API key is configured.
    fn bind(&self, model_name: &str) -> Result<Arc<dyn ModelProvider>>;
}
