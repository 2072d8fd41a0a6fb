//! `init-config`: write a `scenario-builder.toml` holding the default settings.
//!
//! An existing file is left untouched unless `--force` is given. The GitHub
//! token is never part of the written file; it comes from the environment.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config::{ScenarioBuilderConfig, DEFAULT_CONFIG_FILE};

pub struct InitConfigCommand {
    pub path: PathBuf,
    pub force: bool,
}

impl InitConfigCommand {
    pub fn new(path: Option<PathBuf>, force: bool) -> Self {
        Self {
            path: path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            force,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        println!("🛠️  SCENARIO BUILDER INIT - Configuration Setup");
        println!("==============================================");
        println!();

        if self.path.exists() && !self.force {
            println!("⚠️  {} already exists", self.path.display());
            println!("   → Use --force to overwrite it");
            bail!("{} already exists", self.path.display());
        }

        ScenarioBuilderConfig::default().save_to_file(&self.path)?;
        tracing::info!(path = %self.path.display(), "Configuration written");

        println!("✅ Wrote {}", self.path.display());
        println!();
        println!("🎯 NEXT STEPS:");
        println!("   → Set [github] owner and repo to publish scenarios");
        println!("   → Export your token: export GITHUB_TOKEN=your_token");
        println!("   → Open the form: scenario-builder new");
        Ok(())
    }
}
