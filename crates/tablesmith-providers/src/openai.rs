use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use tablesmith_core::config::{DEFAULT_BASE_URL, ENV_OPENAI_API_KEY};
use tablesmith_core::{
    Context, Error, ModelFactory, ModelProvider, NamedModel, Query, Response, Result,
    TablesmithConfig, TokenUsage,
};

/// Model used when none is chosen explicitly.
const DEFAULT_MODEL: &str = "gpt-4o";
/// Completion token limit used when none is configured.
const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Provider implementation for OpenAI-compatible chat completion APIs.
pub struct OpenAiProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Bearer token for the API.
    api_key: String,
    /// Model name to use.
    model: String,
    /// Endpoint base, without the `/chat/completions` suffix.
    base_url: String,
    /// Completion token limit.
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider` with the given API key.
    ///
    /// # Errors
    /// Returns an error if the provided API key is empty.
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::MissingApiKey(ENV_OPENAI_API_KEY.to_owned()));
        }

        Ok(Self {
            client: Client::default(),
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Sets the model to use for generation.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Points the provider at another OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets the completion token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Applies a request timeout to every call.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Full URL of the chat completion endpoint.
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Builds messages from context and query for the chat completion API.
    fn build_messages(context: &Context, query: &Query) -> Vec<Value> {
        let mut messages = vec![json!({
            "role": "system",
            "content": context.system_prompt
        })];

        if !context.files.is_empty() {
            messages.push(json!({
                "role": "user",
                "content": format!("Existing pages:\n{}", context.files_to_string())
            }));
        }

        messages.push(json!({
            "role": "user",
            "content": query.text
        }));

        messages
    }

    /// Extracts the completion text and token usage from a decoded response.
    fn parse_response(api_response: ChatResponse) -> Result<(String, TokenUsage)> {
        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Provider("No response content from model".to_owned()))?;

        let tokens_used = api_response.usage.map_or_else(TokenUsage::default, |usage| {
            let cache_read = usage
                .prompt_tokens_details
                .as_ref()
                .map_or(0, |details| details.cached_tokens);

            TokenUsage {
                input: usage.prompt_tokens.saturating_sub(cache_read),
                output: usage.completion_tokens,
                cache_read,
            }
        });

        Ok((text, tokens_used))
    }
}

/// Response payload returned by the chat completion API.
#[derive(Deserialize)]
struct ChatResponse {
    /// List of generated choices.
    choices: Vec<Choice>,
    /// Optional token usage statistics returned by the service.
    usage: Option<Usage>,
}

/// Individual completion choice.
#[derive(Deserialize)]
struct Choice {
    /// Message payload representing the completion text.
    message: Message,
}

/// Message structure containing generated content.
#[derive(Deserialize)]
struct Message {
    /// Text content produced by the model; absent for refusals and tool calls.
    content: Option<String>,
}

/// Token accounting information for a response.
#[derive(Deserialize)]
struct Usage {
    /// Number of prompt tokens billed for the request.
    prompt_tokens: u64,
    /// Number of completion tokens returned by the model.
    completion_tokens: u64,
    #[serde(default)]
    /// Detailed prompt token usage, when available.
    prompt_tokens_details: Option<PromptTokensDetails>,
}

/// Detailed prompt token usage breakdown.
#[derive(Deserialize)]
struct PromptTokensDetails {
    #[serde(default)]
    /// Count of cached tokens supplied via the API.
    cached_tokens: u64,
}

impl NamedModel for OpenAiProvider {
    fn model_name(&self) -> Option<&str> {
        Some(&self.model)
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, query: &Query, context: &Context) -> Result<Response> {
        let start = Instant::now();

        let messages = Self::build_messages(context, query);

        let request_body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
            "response_format": {"type": "json_object"},
        });

        tracing::debug!(
            "Sending request to {} with model {} (~{} context tokens)",
            self.endpoint(),
            self.model,
            context.token_estimate()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| Error::Provider(format!("Request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Chat completion request failed with status {status}: {error_text}"
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|err| Error::InvalidResponse(format!("Failed to parse response: {err}")))?;

        let (text, tokens_used) = Self::parse_response(api_response)?;
        let latency_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "Model {} answered in {latency_ms}ms using {} tokens",
            self.model,
            tokens_used.total()
        );

        Ok(Response {
            text,
            tokens_used,
            provider: self.name().to_owned(),
            latency_ms,
        })
    }
}

/// Binds [`OpenAiProvider`]s to model identifiers on demand.
///
/// The API key is only required when a model is actually bound, so callers
/// that fail earlier never need one.
#[derive(Debug, Clone)]
pub struct OpenAiModelFactory {
    /// API key shared by every binding.
    api_key: Option<String>,
    /// Endpoint base.
    base_url: String,
    /// Completion token limit.
    max_tokens: u32,
    /// Request timeout.
    timeout: Duration,
}

impl OpenAiModelFactory {
    /// Creates a factory from explicit settings.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(300),
        }
    }

    /// Creates a factory from the provider section of the configuration.
    pub fn from_config(config: &TablesmithConfig) -> Self {
        Self {
            api_key: config.api_key(),
            base_url: config.provider.base_url.clone(),
            max_tokens: config.provider.max_tokens,
            timeout: Duration::from_secs(config.provider.timeout_seconds),
        }
    }
}

impl ModelFactory for OpenAiModelFactory {
    fn bind(&self, model_name: &str) -> Result<Arc<dyn ModelProvider>> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            Error::MissingApiKey(format!("{ENV_OPENAI_API_KEY} or config.toml provider.api_key"))
        })?;

        let provider = OpenAiProvider::new(api_key)?
            .with_model(model_name.to_owned())
            .with_base_url(&self.base_url)
            .with_max_tokens(self.max_tokens)
            .with_timeout(self.timeout)?;

        Ok(Arc::new(provider))
    }
}
