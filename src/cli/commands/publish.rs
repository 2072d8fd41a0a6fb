use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use super::{read_json, report_publish_error};
use crate::config::GitHubConfig;
use crate::github::{PublishError, RemoteCredential, ScenarioPublisher};
use crate::output::{default_filename_now, normalize_filename};
use crate::scenario::ScenarioDocument;

/// Upload a generated document to `scenarios/` in the configured repository
pub struct PublishCommand {
    pub document: PathBuf,
    pub filename: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    github: GitHubConfig,
    publisher: Arc<dyn ScenarioPublisher>,
}

impl PublishCommand {
    pub fn new(document: PathBuf, github: GitHubConfig, publisher: Arc<dyn ScenarioPublisher>) -> Self {
        Self {
            document,
            filename: None,
            owner: None,
            repo: None,
            github,
            publisher,
        }
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn with_repository(mut self, owner: Option<String>, repo: Option<String>) -> Self {
        self.owner = owner;
        self.repo = repo;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let document: ScenarioDocument = read_json(&self.document)?;
        let credential = self
            .github
            .credential(self.owner.as_deref(), self.repo.as_deref());

        match self.publish(&credential, &document).await {
            Ok(url) => {
                println!("✅ Published: {url}");
                Ok(())
            }
            Err(e) => {
                report_publish_error(&e);
                Err(e.into())
            }
        }
    }

    async fn publish(
        &self,
        credential: &RemoteCredential,
        document: &ScenarioDocument,
    ) -> Result<String, PublishError> {
        if !credential.is_complete() {
            return Err(PublishError::MissingConfiguration);
        }

        print!("🔄 Validating token... ");
        std::io::Write::flush(&mut std::io::stdout()).ok();
        if !self.publisher.validate_credential(&credential.token).await {
            println!("❌");
            return Err(PublishError::InvalidCredential);
        }
        println!("✅");

        let filename = normalize_filename(
            &self.filename.clone().unwrap_or_else(default_filename_now),
        );
        println!("🐙 Uploading scenarios/{filename} to {}", credential.repository());
        self.publisher.publish(credential, &filename, document).await
    }
}

/// `check-token`: one identity request with the configured token
pub struct CheckTokenCommand {
    token: Option<String>,
    publisher: Arc<dyn ScenarioPublisher>,
}

impl CheckTokenCommand {
    pub fn new(token: Option<String>, publisher: Arc<dyn ScenarioPublisher>) -> Self {
        Self { token, publisher }
    }

    pub async fn execute(&self) -> Result<()> {
        let token = self.token.as_deref().unwrap_or_default();
        if token.trim().is_empty() {
            let err = PublishError::MissingConfiguration;
            report_publish_error(&err);
            return Err(err.into());
        }

        print!("🔑 Checking GitHub token... ");
        std::io::Write::flush(&mut std::io::stdout()).ok();
        if self.publisher.validate_credential(token).await {
            println!("✅");
            println!("Token accepted by GitHub");
            Ok(())
        } else {
            println!("❌");
            let err = PublishError::InvalidCredential;
            report_publish_error(&err);
            Err(err.into())
        }
    }
}
