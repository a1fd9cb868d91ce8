//! Mock provider for testing agent responses.
//!
//! Allows defining canned responses for specific queries, enabling
//! end-to-end testing of the generation pipeline without real API calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tablesmith_core::{
    Context, Error, IgnoreLock as _, ModelFactory, ModelProvider, Query, Response, Result,
    TokenUsage,
};

/// Response storage type
type ResponseMap = Arc<Mutex<HashMap<String, String>>>;

/// Mock provider that returns pre-defined responses based on query patterns.
///
/// It also acts as its own [`ModelFactory`]: every binding shares the same
/// responses and history, and the bound model names are recorded.
#[derive(Clone)]
pub struct MockProvider {
    /// Model name reported by this binding
    model: String,
    /// Predefined responses keyed by query text
    responses: ResponseMap,
    /// Default response if no match found
    default_response: Arc<Mutex<Option<String>>>,
    /// Error message returned instead of a response, if set
    failure: Arc<Mutex<Option<String>>>,
    /// Call history for verification
    call_history: Arc<Mutex<Vec<String>>>,
    /// Contexts received, in call order
    contexts: Arc<Mutex<Vec<Context>>>,
    /// Model names passed to `bind`
    bound_models: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider reporting the given model name.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
            contexts: Arc::new(Mutex::new(Vec::new())),
            bound_models: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a pattern-based response to the mock provider.
    #[must_use]
    pub fn with_response(self, pattern: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .lock_ignore_poison()
            .insert(pattern.into(), response.into());
        self
    }

    /// Set a default response for queries that don't match any pattern.
    #[must_use]
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        *self.default_response.lock_ignore_poison() = Some(response.into());
        self
    }

    /// Make every call fail with a provider error.
    #[must_use]
    pub fn with_error(self, message: impl Into<String>) -> Self {
        *self.failure.lock_ignore_poison() = Some(message.into());
        self
    }

    /// Get the call history (list of all queries made).
    #[must_use]
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock_ignore_poison().clone()
    }

    /// Get the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_history.lock_ignore_poison().len()
    }

    /// Contexts received so far.
    #[must_use]
    pub fn received_contexts(&self) -> Vec<Context> {
        self.contexts.lock_ignore_poison().clone()
    }

    /// Model names requested through [`ModelFactory::bind`].
    #[must_use]
    pub fn bound_models(&self) -> Vec<String> {
        self.bound_models.lock_ignore_poison().clone()
    }

    /// Find a matching response for the given query text.
    fn find_response(&self, query_text: &str) -> Option<String> {
        let responses = self.responses.lock_ignore_poison();

        if let Some(response) = responses.get(query_text) {
            return Some(response.clone());
        }

        responses
            .iter()
            .find(|(pattern, _)| query_text.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, query: &Query, context: &Context) -> Result<Response> {
        self.call_history.lock_ignore_poison().push(query.text.clone());
        self.contexts.lock_ignore_poison().push(context.clone());

        if let Some(message) = self.failure.lock_ignore_poison().clone() {
            return Err(Error::Provider(message));
        }

        let text = self.find_response(&query.text).unwrap_or_else(|| {
            self.default_response
                .lock_ignore_poison()
                .clone()
                .unwrap_or_else(|| format!("Mock response for query: {}", query.text))
        });

        Ok(Response {
            text,
            tokens_used: TokenUsage {
                input: query.text.len() as u64,
                ..TokenUsage::default()
            },
            provider: self.name().to_owned(),
            latency_ms: 0,
        })
    }
}

impl ModelFactory for MockProvider {
    fn bind(&self, model_name: &str) -> Result<Arc<dyn ModelProvider>> {
        self.bound_models
            .lock_ignore_poison()
            .push(model_name.to_owned());
        let mut binding = self.clone();
        binding.model = model_name.to_owned();
        Ok(Arc::new(binding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_exact_match() {
        let provider = MockProvider::new("test").with_response("hello", "world");

        let response = provider
            .generate(&Query::new("hello"), &Context::new("test"))
            .await
            .unwrap();
        assert_eq!(response.text, "world");
    }

    #[tokio::test]
    async fn test_mock_provider_substring_match() {
        let provider = MockProvider::new("test").with_response("bookshop", "{\"success\":true}");

        let response = provider
            .generate(&Query::new("Design a database for a bookshop"), &Context::new("test"))
            .await
            .unwrap();
        assert_eq!(response.text, "{\"success\":true}");
    }

    #[tokio::test]
    async fn test_mock_provider_default_response() {
        let provider = MockProvider::new("test").with_default_response("Default response");

        let response = provider
            .generate(&Query::new("unmatched query"), &Context::new("test"))
            .await
            .unwrap();
        assert_eq!(response.text, "Default response");
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let provider = MockProvider::new("test").with_error("quota exceeded");

        let result = provider
            .generate(&Query::new("anything"), &Context::new("test"))
            .await;
        assert!(matches!(result, Err(Error::Provider(message)) if message == "quota exceeded"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_bindings_share_history() {
        let factory = MockProvider::new("unbound").with_default_response("ok");

        let binding = factory.bind("gpt-4o-mini").unwrap();
        assert_eq!(binding.model(), "gpt-4o-mini");

        binding
            .generate(&Query::new("first query"), &Context::new("system"))
            .await
            .unwrap();

        assert_eq!(factory.bound_models(), vec!["gpt-4o-mini"]);
        assert_eq!(factory.get_call_history(), vec!["first query"]);
        assert_eq!(factory.received_contexts()[0].system_prompt, "system");
    }
}
