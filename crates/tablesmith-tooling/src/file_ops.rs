//! File writing confined to a project root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{Tool, ToolError, ToolInput, ToolOutput, ToolResult};

/// Tool for writing files below a fixed root directory.
///
/// Existing files are overwritten, so writing the same content twice leaves
/// the tree unchanged.
pub struct WriteFileTool {
    /// Root directory to constrain file access
    root_dir: PathBuf,
}

impl WriteFileTool {
    /// Create a new `WriteFileTool` with the given root directory.
    ///
    /// All file paths will be resolved relative to this root directory.
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Resolve a path relative to the root directory and validate it's within bounds.
    ///
    /// Parent directories are created once the path is known to stay inside the root.
    ///
    /// # Errors
    /// Returns error if path escapes the root directory
    pub fn resolve(&self, path: &str) -> ToolResult<PathBuf> {
        if normalize_relative(path).is_none() {
            return Err(ToolError::InvalidInput(format!(
                "Path '{path}' is outside the allowed directory"
            )));
        }

        let full_path = self.root_dir.join(path);

        let canonical_root = self
            .root_dir
            .canonicalize()
            .map_err(|err| ToolError::InvalidInput(format!("Invalid root directory: {err}")))?;

        let parent = full_path
            .parent()
            .ok_or_else(|| ToolError::InvalidInput(format!("Invalid path: {path}")))?;

        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|err| {
                ToolError::ExecutionFailed(format!("Failed to create parent directories: {err}"))
            })?;
        }

        // Symlinked directories can still point outside the root.
        let canonical_parent = parent.canonicalize().map_err(|err| {
            ToolError::InvalidInput(format!("Invalid parent directory for '{path}': {err}"))
        })?;

        if !canonical_parent.starts_with(&canonical_root) {
            return Err(ToolError::InvalidInput(format!(
                "Path '{path}' is outside the allowed directory"
            )));
        }

        Ok(full_path)
    }

    /// Write `content` to `path` (relative to the root) and return the full path.
    ///
    /// # Errors
    /// Returns an error if the path escapes the root or the write fails.
    pub fn write(&self, path: &str, content: &str) -> ToolResult<PathBuf> {
        let full_path = self.resolve(path)?;

        tracing::debug!(
            "WriteFileTool: writing {} bytes to {} (resolved from '{}')",
            content.len(),
            full_path.display(),
            path
        );

        fs::write(&full_path, content).map_err(|err| {
            ToolError::ExecutionFailed(format!("Failed to write file '{path}': {err}"))
        })?;

        Ok(full_path)
    }
}

/// Lexical form of a root-relative path: its normal components joined by `/`.
///
/// Returns `None` for paths that are empty, absolute, not UTF-8 or that
/// contain `..`.
pub fn normalize_relative(path: &str) -> Option<String> {
    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &'static str {
        "writeFile"
    }

    fn description(&self) -> &'static str {
        "Writes content to a file relative to the project root, creating parent directories."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path relative to the project root"},
                "content": {"type": "string", "description": "Full file content"}
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let Some(obj) = input.params.as_object() else {
            return Err(ToolError::InvalidInput(
                "writeFile requires path and content parameters".to_owned(),
            ));
        };
        let path = obj.get("path").and_then(Value::as_str).ok_or_else(|| {
            ToolError::InvalidInput("writeFile requires a 'path' parameter".to_owned())
        })?;
        let content = obj.get("content").and_then(Value::as_str).ok_or_else(|| {
            ToolError::InvalidInput("writeFile requires a 'content' parameter".to_owned())
        })?;

        self.write(path, content)?;

        Ok(ToolOutput::success(format!(
            "Wrote {} bytes to {path}",
            content.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_success() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let tool = WriteFileTool::new(temp_dir.path());
        let input = ToolInput {
            params: json!({
                "path": "db/schema.sql",
                "content": "CREATE TABLE users (id INTEGER PRIMARY KEY);"
            }),
        };

        let result = tool.execute(input).await?;
        assert!(result.success);

        let written_content = fs::read_to_string(temp_dir.path().join("db/schema.sql"))?;
        assert_eq!(written_content, "CREATE TABLE users (id INTEGER PRIMARY KEY);");
        Ok(())
    }

    #[test]
    fn test_write_overwrites_existing_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let tool = WriteFileTool::new(temp_dir.path());

        tool.write("lib/db.js", "first")?;
        let full_path = tool.write("lib/db.js", "second")?;

        assert_eq!(full_path, temp_dir.path().join("lib/db.js"));
        assert_eq!(fs::read_to_string(full_path)?, "second");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_content_parameter() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let tool = WriteFileTool::new(temp_dir.path());

        let result = tool
            .execute(ToolInput {
                params: json!({"path": "a.txt"}),
            })
            .await;
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
        Ok(())
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize_relative("./db//app.db").as_deref(), Some("db/app.db"));
        assert_eq!(normalize_relative("app.db").as_deref(), Some("app.db"));
        assert_eq!(normalize_relative("../x.db"), None);
        assert_eq!(normalize_relative("db/../../x.db"), None);
        assert_eq!(normalize_relative("/tmp/x.db"), None);
        assert_eq!(normalize_relative(""), None);
        assert_eq!(normalize_relative("."), None);
    }

    #[test]
    fn test_path_traversal_prevention() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let project = temp_dir.path().join("project");
        fs::create_dir(&project)?;
        let tool = WriteFileTool::new(&project);

        let result = tool.write("../outside/malicious.txt", "bad");
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
        assert!(!temp_dir.path().join("outside").exists());

        let absolute = temp_dir.path().join("abs.txt");
        let result = tool.write(&absolute.to_string_lossy(), "bad");
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
        assert!(!absolute.exists());
        Ok(())
    }
}
