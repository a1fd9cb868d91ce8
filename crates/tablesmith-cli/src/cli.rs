use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for tablesmith
#[derive(Parser)]
#[command(name = "tablesmith")]
#[command(about = "Generate a SQLite data layer for a Next.js project", long_about = None)]
pub struct Cli {
    /// Configuration file to use instead of ~/.tablesmith/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a project and generate its database layer
    #[command(about = "Generate the database layer for a project")]
    Generate(GenerateArgs),

    /// Print the page routes the scanner finds
    #[command(about = "List the routes discovered in a project")]
    Scan {
        /// Project root to scan
        #[arg(short, long, default_value = ".", help = "Project root directory")]
        project: PathBuf,
    },

    /// Print the effective configuration
    #[command(about = "Show configuration")]
    Config {
        /// Include every default value
        #[arg(long, help = "Show full configuration including defaults")]
        full: bool,
    },
}

/// Arguments of the `generate` subcommand
#[derive(Args)]
pub struct GenerateArgs {
    /// Project root to scan and write into
    #[arg(short, long, default_value = ".", help = "Project root directory")]
    pub project: PathBuf,

    /// Free-text application description
    #[arg(short, long, help = "What the application does")]
    pub description: String,

    /// Model identifier, overriding the configured one
    #[arg(short, long, help = "Model to use (overrides config)")]
    pub model: Option<String>,

    /// Leave out authentication tables
    #[arg(long, help = "Skip user and credential tables")]
    pub no_auth: bool,

    /// Leave out session tables
    #[arg(long, help = "Skip session tables")]
    pub no_session: bool,

    /// Database file name, overriding the configured one
    #[arg(long, help = "Database file name relative to the project root")]
    pub database_name: Option<String>,
}
