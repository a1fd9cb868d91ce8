//! Tablesmith CLI - generates a SQLite data layer for Next.js projects
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser as _;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod cli;
mod handlers;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "tablesmith_agent=info,tablesmith_context=info,tablesmith_providers=info".into()
        }))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = handlers::load_config(cli.config.as_deref());

    match cli.command {
        Commands::Generate(args) => {
            if !handlers::handle_generate(&config, args).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Scan { project } => handlers::handle_scan(&config, project)?,
        Commands::Config { full } => handlers::handle_config(&config, full)?,
    }

    Ok(ExitCode::SUCCESS)
}
