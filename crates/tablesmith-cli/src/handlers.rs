//! Command handlers for CLI operations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tablesmith_agent::DatabasePipeline;
use tablesmith_context::ContextScanner;
use tablesmith_core::{ExecutionContext, TablesmithConfig};
use tablesmith_providers::OpenAiModelFactory;

use crate::cli::GenerateArgs;

/// Load the configuration from `path`, or from the default location.
///
/// A file that cannot be loaded is reported and replaced by defaults.
pub fn load_config(path: Option<&Path>) -> TablesmithConfig {
    let resolved = path.map_or_else(TablesmithConfig::config_path, |path| Ok(path.to_path_buf()));
    let path = match resolved {
        Ok(path) => path,
        Err(error) => {
            tracing::warn!("{error}; using default configuration");
            return TablesmithConfig::default();
        }
    };

    TablesmithConfig::load_or_create(&path).unwrap_or_else(|error| {
        tracing::warn!("Failed to load config from {}: {error}", path.display());
        tracing::warn!("Using default configuration");
        TablesmithConfig::default()
    })
}

/// Run the pipeline and print its outcome. Returns whether it succeeded.
///
/// # Errors
/// Returns an error if scanning or the agent invocation fails.
pub async fn handle_generate(config: &TablesmithConfig, args: GenerateArgs) -> Result<bool> {
    let mut options = config.generation.to_options();
    if args.no_auth {
        options.include_auth = false;
    }
    if args.no_session {
        options.include_session = false;
    }
    if let Some(database_name) = args.database_name {
        options.database_name = database_name;
    }

    let mut context = ExecutionContext::new(args.project, args.description);
    if let Some(model) = args.model.or_else(|| config.provider.default_model.clone()) {
        context = context.with_model_name(model);
    }

    let factory = OpenAiModelFactory::from_config(config);
    let pipeline =
        DatabasePipeline::new(Arc::new(factory)).with_pages_dir(config.scan.pages_dir.as_str());

    let outcome = pipeline.run(&context, &options).await?;

    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        println!("{outcome}");
    }

    Ok(outcome.success)
}

/// Print the routes found in `project`.
///
/// # Errors
/// Returns an error if the pages directory cannot be read.
pub fn handle_scan(config: &TablesmithConfig, project: PathBuf) -> Result<()> {
    let report = ContextScanner::new(project)
        .with_pages_dir(config.scan.pages_dir.as_str())
        .scan()?;

    tracing::info!("Discovered {} routes", report.routes.len());

    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        for route in &report.routes {
            if report.content(route).is_some() {
                println!("{route}");
            } else {
                println!("{route} (no content)");
            }
        }
    }

    Ok(())
}

/// Print the effective configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be serialized.
pub fn handle_config(config: &TablesmithConfig, full: bool) -> Result<()> {
    let summary = if full {
        toml::to_string_pretty(config)?
    } else {
        format!(
            "Configuration:\n  API key: {}\n  Base URL: {}\n  Default model: {}\n  Pages directory: {}\n  Database name: {}",
            if config.api_key().is_some() {
                "Set"
            } else {
                "Not set"
            },
            config.provider.base_url,
            config
                .provider
                .default_model
                .as_deref()
                .unwrap_or("(none)"),
            config.scan.pages_dir,
            config.generation.database_name,
        )
    };

    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        println!("{summary}");
    }

    Ok(())
}
