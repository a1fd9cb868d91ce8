use serde::{Deserialize, Serialize};

/// A single prompt sent to a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// User-facing prompt text.
    pub text: String,
}

impl Query {
    /// Creates a query from prompt text.
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self { text: text.into() }
    }
}

/// Text returned by a model provider along with accounting data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Generated text.
    pub text: String,
    /// Token accounting for the request.
    pub tokens_used: TokenUsage,
    /// Name of the provider that produced the response.
    pub provider: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens billed at the normal rate.
    pub input: u64,
    /// Completion tokens.
    pub output: u64,
    /// Prompt tokens served from the provider cache.
    pub cache_read: u64,
}

impl TokenUsage {
    /// Total number of tokens across all categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.input + self.output + self.cache_read
    }
}

/// System prompt plus supporting files sent alongside a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Files given to the model as reference material.
    pub files: Vec<FileContext>,
    /// Instructions for the model.
    pub system_prompt: String,
}

impl Context {
    /// Creates a context with the given system prompt and no files.
    pub fn new<T: Into<String>>(system_prompt: T) -> Self {
        Self {
            files: Vec::new(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Replaces the attached files.
    #[must_use]
    pub fn with_files(mut self, files: Vec<FileContext>) -> Self {
        self.files = files;
        self
    }

    /// Renders the attached files as one block of text.
    #[must_use]
    pub fn files_to_string(&self) -> String {
        self.files
            .iter()
            .map(|file| format!("// Page: {}\n{}\n", file.path, file.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rough token estimate (four bytes per token).
    #[must_use]
    pub fn token_estimate(&self) -> usize {
        let files_len: usize = self.files.iter().map(|file| file.content.len()).sum();
        (self.system_prompt.len() + files_len) / 4
    }
}

/// A named piece of source text attached to a [`Context`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContext {
    /// Display path, for pages the virtual route.
    pub path: String,
    /// File text.
    pub content: String,
}

impl FileContext {
    /// Creates a file context from a path and its content.
    #[must_use]
    pub fn new(path: String, content: String) -> Self {
        Self { path, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_to_string_labels_each_page() {
        let context = Context::new("system").with_files(vec![
            FileContext::new("/index.js".to_owned(), "home".to_owned()),
            FileContext::new("/users/[id].jsx".to_owned(), "user".to_owned()),
        ]);
        assert_eq!(
            context.files_to_string(),
            "// Page: /index.js\nhome\n\n// Page: /users/[id].jsx\nuser\n"
        );
    }

    #[test]
    fn test_token_estimate_counts_prompt_and_files() {
        let context = Context::new("a".repeat(40))
            .with_files(vec![FileContext::new("/a.js".to_owned(), "b".repeat(40))]);
        assert_eq!(context.token_estimate(), 20);
    }
}
