use serde::Deserialize;
use tablesmith_core::{Error, Result};

/// A file the agent wants written into the project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannedFile {
    /// Path relative to the project root
    pub path: String,
    /// Full file content
    pub content: String,
}

/// Structured answer expected from the model.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentPlan {
    /// Whether the model could fulfil the request
    pub success: bool,
    /// Summary, or the failure reason when `success` is false
    #[serde(default)]
    pub message: String,
    /// DDL applied before the seed data
    #[serde(default)]
    pub schema_sql: String,
    /// Sample rows
    #[serde(default)]
    pub seed_sql: String,
    /// Data access files
    #[serde(default)]
    pub files: Vec<PlannedFile>,
}

impl AgentPlan {
    /// Parse a model answer, tolerating Markdown fences and surrounding prose.
    ///
    /// # Errors
    /// Returns [`Error::InvalidResponse`] if no JSON plan can be extracted.
    pub fn parse(text: &str) -> Result<Self> {
        let candidate = extract_json(text).ok_or_else(|| {
            Error::InvalidResponse("model answer contains no JSON object".to_owned())
        })?;

        serde_json::from_str(candidate)
            .map_err(|err| Error::InvalidResponse(format!("malformed generation plan: {err}")))
    }
}

fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }

    if let Some(fenced) = strip_fence(trimmed) {
        return Some(fenced);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

fn strip_fence(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    let body_start = after_open.find('\n')? + 1;
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    let inner = body[..close].trim();
    inner.starts_with('{').then_some(inner)
}
