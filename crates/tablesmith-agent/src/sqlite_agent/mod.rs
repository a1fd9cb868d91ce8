//! Model-backed agent that designs and builds the SQLite layer.
//!
//! The agent asks its model for a JSON plan, writes the plan's SQL and data
//! access files into the project, then builds the database so the SQL is known
//! to run before success is reported.

mod database;
mod plan;
mod prompts;

use std::sync::Arc;
use std::time::Instant;

use tablesmith_core::{
    Context, Error, ExecutionContext, FileContext, GenerationRequest, GenerationResult,
    ModelProvider, Query, Result,
};
use tablesmith_tooling::{ToolError, WriteFileTool, normalize_relative};

pub use database::{BuildOutcome, build_database};
pub use plan::{AgentPlan, PlannedFile};
pub use prompts::{SYSTEM_PROMPT, render_request};

/// Relative path of the schema script written into the project.
pub const SCHEMA_PATH: &str = "db/schema.sql";
/// Relative path of the seed script written into the project.
pub const SEED_PATH: &str = "db/seed.sql";

/// Generation agent bound to one model.
pub struct SqliteAgent {
    model: Arc<dyn ModelProvider>,
}

impl SqliteAgent {
    /// Create an agent that plans with `model`.
    pub fn new(model: Arc<dyn ModelProvider>) -> Self {
        Self { model }
    }

    /// Run one generation against `request.project_path`.
    ///
    /// A plan the model marks as unsuccessful, or SQL that SQLite rejects,
    /// yields a failed [`GenerationResult`] rather than an error.
    ///
    /// # Errors
    /// Returns [`Error::InvalidResponse`] if the answer is not a plan or a planned
    /// file escapes the project or collides with a generated path, and
    /// [`Error::Config`] if the database name or project root is unusable.
    /// Model and I/O failures are returned as they occur.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        context: &ExecutionContext,
    ) -> Result<GenerationResult> {
        let query = Query::new(render_request(request));
        let model_context = Context::new(SYSTEM_PROMPT).with_files(page_files(request));

        tracing::info!(
            "Requesting SQLite plan for {} ({} pages, ~{} context tokens)",
            context.project_path.display(),
            request.existing_routes.len(),
            model_context.token_estimate()
        );

        let start = Instant::now();
        let response = self.model.generate(&query, &model_context).await?;
        tracing::debug!(
            "Model {} answered in {}ms using {} tokens",
            response.provider,
            start.elapsed().as_millis(),
            response.tokens_used.total()
        );

        let plan = AgentPlan::parse(&response.text)?;
        if !plan.success {
            tracing::warn!("Model declined the request: {}", plan.message);
            return Ok(GenerationResult::failed(plan.message));
        }
        if plan.schema_sql.trim().is_empty() {
            return Ok(GenerationResult::failed("Generated plan contains no schema"));
        }

        apply_plan(request, plan)
    }
}

fn apply_plan(request: &GenerationRequest, plan: AgentPlan) -> Result<GenerationResult> {
    let database_name = normalize_relative(&request.database_name).ok_or_else(|| {
        Error::Config(format!(
            "Invalid database name '{}': must be a file path inside the project",
            request.database_name
        ))
    })?;
    let planned = planned_files(&plan.files, &database_name)?;

    let writer = WriteFileTool::new(&request.project_path);
    let mut created_files = Vec::with_capacity(planned.len() + 3);

    write_file(&writer, SCHEMA_PATH, &plan.schema_sql, Error::Config)?;
    created_files.push(SCHEMA_PATH.to_owned());

    if !plan.seed_sql.trim().is_empty() {
        write_file(&writer, SEED_PATH, &plan.seed_sql, Error::Config)?;
        created_files.push(SEED_PATH.to_owned());
    }

    for (path, content) in planned {
        write_file(&writer, &path, content, Error::InvalidResponse)?;
        if !created_files.contains(&path) {
            created_files.push(path);
        }
    }

    let database_path = writer
        .resolve(&database_name)
        .map_err(|err| tool_error(&database_name, err, Error::Config))?;

    match build_database(&database_path, &plan.schema_sql, &plan.seed_sql)? {
        BuildOutcome::Built(tables) => {
            tracing::info!("Built {database_name} with tables: {}", tables.join(", "));
            created_files.push(database_name);
            let message = if plan.message.is_empty() {
                format!("Created {} tables", tables.len())
            } else {
                plan.message
            };
            Ok(GenerationResult::succeeded(message, created_files))
        }
        BuildOutcome::Rejected(reason) => Ok(GenerationResult::failed(format!(
            "Generated SQL failed to apply: {reason}"
        ))),
    }
}

/// Normalizes the plan's file paths and rejects any that would overwrite the
/// SQL scripts or the database.
fn planned_files<'plan>(
    files: &'plan [PlannedFile],
    database_name: &str,
) -> Result<Vec<(String, &'plan str)>> {
    let reserved = [SCHEMA_PATH, SEED_PATH, database_name];

    files
        .iter()
        .map(|file| {
            let path = normalize_relative(&file.path).ok_or_else(|| {
                Error::InvalidResponse(format!(
                    "Planned file '{}' is outside the project",
                    file.path
                ))
            })?;
            if reserved.contains(&path.as_str()) {
                return Err(Error::InvalidResponse(format!(
                    "Planned file '{}' collides with the generated {path}",
                    file.path
                )));
            }
            Ok((path, file.content.as_str()))
        })
        .collect()
}

fn page_files(request: &GenerationRequest) -> Vec<FileContext> {
    request
        .existing_routes
        .iter()
        .filter_map(|route| {
            request
                .route_contents
                .get(route)
                .map(|content| FileContext::new(route.clone(), content.clone()))
        })
        .collect()
}

fn write_file(
    writer: &WriteFileTool,
    path: &str,
    content: &str,
    on_invalid: fn(String) -> Error,
) -> Result<()> {
    writer
        .write(path, content)
        .map_err(|err| tool_error(path, err, on_invalid))?;
    tracing::debug!("Wrote {path}");
    Ok(())
}

/// `on_invalid` decides who is blamed for a rejected path: the caller for
/// fixed paths, the model for planned ones.
fn tool_error(path: &str, error: ToolError, on_invalid: fn(String) -> Error) -> Error {
    match error {
        ToolError::InvalidInput(reason) => on_invalid(format!("Path '{path}' rejected: {reason}")),
        ToolError::Io(err) => Error::Io(err),
        other => Error::Other(other.to_string()),
    }
}
