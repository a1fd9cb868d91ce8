use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tablesmith_core::{ExecutionContext, GenerationOptions};
use tablesmith_tooling::{Tool, ToolError, ToolInput, ToolOutput, ToolResult};

use crate::orchestrator::DatabasePipeline;

/// Exposes [`DatabasePipeline`] to tool-calling hosts for one project.
pub struct GenerateDatabaseTool {
    pipeline: Arc<DatabasePipeline>,
    context: ExecutionContext,
}

impl GenerateDatabaseTool {
    /// Create a tool that runs `pipeline` against `context`.
    pub fn new(pipeline: Arc<DatabasePipeline>, context: ExecutionContext) -> Self {
        Self { pipeline, context }
    }
}

#[async_trait]
impl Tool for GenerateDatabaseTool {
    fn name(&self) -> &'static str {
        "generateSqliteDatabase"
    }

    fn description(&self) -> &'static str {
        "Designs and builds a SQLite database layer for the current Next.js project, including \
         schema, seed data and data access files."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "include_auth": {
                    "type": "boolean",
                    "description": "Generate user and credential tables",
                    "default": true
                },
                "include_session": {
                    "type": "boolean",
                    "description": "Generate session tables",
                    "default": true
                },
                "database_name": {
                    "type": "string",
                    "description": "Database file name relative to the project root",
                    "default": "app.db"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params = if input.params.is_null() {
            json!({})
        } else {
            input.params
        };
        let options: GenerationOptions = serde_json::from_value(params)
            .map_err(|err| ToolError::InvalidInput(format!("Invalid parameters: {err}")))?;

        let outcome = self
            .pipeline
            .run(&self.context, &options)
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;

        Ok(if outcome.success {
            ToolOutput::success_with_data(outcome.message, serde_json::to_value(&options)?)
        } else {
            ToolOutput::error(outcome.message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_providers::MockProvider;
    use tempfile::TempDir;

    fn tool(context: ExecutionContext) -> GenerateDatabaseTool {
        let pipeline = DatabasePipeline::new(Arc::new(MockProvider::new("unused")));
        GenerateDatabaseTool::new(Arc::new(pipeline), context)
    }

    #[test]
    fn test_schema_lists_options() {
        let schema = tool(ExecutionContext::new("/srv/app", "app")).parameters_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("include_auth"));
        assert!(properties.contains_key("include_session"));
        assert!(properties.contains_key("database_name"));
    }

    #[tokio::test]
    async fn test_failure_outcome_is_error_output() {
        let dir = TempDir::new().unwrap();
        let result = tool(ExecutionContext::new(dir.path(), "app"))
            .execute(ToolInput {
                params: json!({"notes": "free text from an older caller"}),
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(
            result.message,
            "Failed to generate SQLite database: AI model not available in context"
        );
    }

    #[tokio::test]
    async fn test_wrongly_typed_param_is_invalid_input() {
        let result = tool(ExecutionContext::new("/srv/app", "app"))
            .execute(ToolInput {
                params: json!({"include_auth": "yes"}),
            })
            .await;

        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    }
}
