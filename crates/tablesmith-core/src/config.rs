//! Configuration types for the model provider, generation defaults and page scanning.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use toml::{from_str, to_string_pretty};

use crate::{Error, GenerationOptions, Result};

/// Env var consulted when no API key is configured.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Default OpenAI-compatible endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Complete tablesmith configuration.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesmithConfig {
    /// Model provider settings
    pub provider: ProviderConfig,
    /// Defaults applied to generation runs
    pub generation: GenerationDefaults,
    /// Page discovery settings
    pub scan: ScanConfig,
}

/// Settings for the OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key, falls back to `OPENAI_API_KEY`
    pub api_key: Option<String>,
    /// Base URL of the endpoint, without `/chat/completions`
    pub base_url: String,
    /// Model used when the caller does not name one
    pub default_model: Option<String>,
    /// Completion token limit per request
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            default_model: None,
            max_tokens: 8192,
            timeout_seconds: 300,
        }
    }
}

/// Defaults for [`GenerationOptions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    /// Generate user and credential tables
    pub include_auth: bool,
    /// Generate session tables
    pub include_session: bool,
    /// SQLite database file name
    pub database_name: String,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        let options = GenerationOptions::default();
        Self {
            include_auth: options.include_auth,
            include_session: options.include_session,
            database_name: options.database_name,
        }
    }
}

impl GenerationDefaults {
    /// Converts the defaults into run options.
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            include_auth: self.include_auth,
            include_session: self.include_session,
            database_name: self.database_name.clone(),
        }
    }
}

/// Page discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory under the project root holding routable pages
    pub pages_dir: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pages_dir: "pages".to_owned(),
        }
    }
}

impl TablesmithConfig {
    /// Get the default config directory path (`~/.tablesmith`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))?;
        Ok(home.join(".tablesmith"))
    }

    /// Get the default config file path (`~/.tablesmith/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from `path`, creating it with default values if missing.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed or created
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let config = Self::default();
            config.save_to_file(path)?;
            tracing::info!("Created default configuration at {}", path.display());
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = from_str(&contents)?;

        tracing::debug!(
            "Loaded config from {}: api_key={}, default_model={:?}",
            path.display(),
            if config.provider.api_key.is_some() {
                "present"
            } else {
                "missing"
            },
            config.provider.default_model
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = to_string_pretty(self)?;

        let header = "# Tablesmith Configuration File\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to customize your settings\n\n";

        fs::write(path, format!("{header}{contents}"))?;

        Ok(())
    }

    /// API key from the config file, then from `OPENAI_API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.provider
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| env::var(ENV_OPENAI_API_KEY).ok())
    }
}
