use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::github::{RemoteCredential, DEFAULT_API_BASE_URL};

pub const DEFAULT_CONFIG_FILE: &str = "scenario-builder.toml";

/// Main configuration structure for Scenario Builder
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenarioBuilderConfig {
    /// GitHub publishing target
    pub github: GitHubConfig,
    /// Where downloads are written
    pub output: OutputConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Personal access token; read from the environment, never written back
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Repository owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// API root, overridable for GitHub Enterprise
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory downloaded scenarios are written to
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None, // Will be read from env var
            owner: String::new(),
            repo: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl GitHubConfig {
    /// Credential assembled from configuration, with optional overrides for owner/repo
    pub fn credential(&self, owner: Option<&str>, repo: Option<&str>) -> RemoteCredential {
        RemoteCredential::new(
            self.token.clone().unwrap_or_default(),
            owner.unwrap_or(&self.owner),
            repo.unwrap_or(&self.repo),
        )
    }
}

impl ScenarioBuilderConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`path`, or scenario-builder.toml when present)
    /// 3. Environment variables (prefixed with SCENARIO_BUILDER_, nested with `__`)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        // Override with environment variables
        builder = builder.add_source(
            Environment::with_prefix("SCENARIO_BUILDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration")?;

        let mut scenario_config: ScenarioBuilderConfig = config
            .try_deserialize()
            .context("Failed to parse configuration")?;

        // Fall back to the conventional GitHub token variable
        if scenario_config.github.token.is_none() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                scenario_config.github.token = Some(token);
            }
        }

        Ok(scenario_config)
    }

    /// Save configuration to file. The token is never included.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
