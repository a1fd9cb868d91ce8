use std::path::{Path, PathBuf};

use tablesmith_core::{Error, ExecutionContext, GenerationOptions, Result};
use tablesmith_tooling::normalize_relative;

use crate::sqlite_agent::{SCHEMA_PATH, SEED_PATH};

/// Reason reported when the context carries no project path.
pub const PROJECT_PATH_UNAVAILABLE: &str = "Project path not available in context";
/// Reason reported when no model identifier can be resolved.
pub const MODEL_UNAVAILABLE: &str = "AI model not available in context";

/// Returns the project root once it is known to be an existing directory.
///
/// The emptiness check happens before any filesystem access.
///
/// # Errors
/// Returns [`Error::Config`] if the path is empty or not a directory.
pub fn resolve_project_path(context: &ExecutionContext) -> Result<&Path> {
    if context.project_path.as_os_str().is_empty() {
        return Err(Error::Config(PROJECT_PATH_UNAVAILABLE.to_owned()));
    }
    if !context.project_path.is_dir() {
        return Err(Error::Config(format!(
            "Project path {} is not a directory",
            context.project_path.display()
        )));
    }
    Ok(&context.project_path)
}

/// Returns the model identifier, preferring a directly named model.
///
/// # Errors
/// Returns [`Error::Config`] if neither source yields a non-empty identifier.
pub fn resolve_model_name(context: &ExecutionContext) -> Result<String> {
    context
        .model
        .as_ref()
        .and_then(|source| source.model_name())
        .map(str::to_owned)
        .ok_or_else(|| Error::Config(MODEL_UNAVAILABLE.to_owned()))
}

/// Returns the database file name in its normalized project-relative form.
///
/// # Errors
/// Returns [`Error::Config`] if the name leaves the project root or names one
/// of the generated SQL scripts.
pub fn resolve_database_name(options: &GenerationOptions) -> Result<String> {
    let name = &options.database_name;
    let normalized = normalize_relative(name).ok_or_else(|| {
        Error::Config(format!(
            "Invalid database name '{name}': must be a file path inside the project"
        ))
    })?;
    if normalized == SCHEMA_PATH || normalized == SEED_PATH {
        return Err(Error::Config(format!(
            "Database name '{name}' collides with the generated {normalized}"
        )));
    }
    Ok(normalized)
}

/// Everything the pipeline needs before touching the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependencies {
    /// Project root to scan and write into
    pub project_path: PathBuf,
    /// Identifier handed to the model factory
    pub model_name: String,
    /// Normalized database file name
    pub database_name: String,
}

/// Resolves the project path, then the model, then the database name.
///
/// # Errors
/// Returns the first [`Error::Config`] encountered.
pub fn resolve(
    context: &ExecutionContext,
    options: &GenerationOptions,
) -> Result<ResolvedDependencies> {
    let project_path = resolve_project_path(context)?.to_path_buf();
    let model_name = resolve_model_name(context)?;
    let database_name = resolve_database_name(options)?;
    Ok(ResolvedDependencies {
        project_path,
        model_name,
        database_name,
    })
}
