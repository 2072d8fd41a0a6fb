use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use http::header::{ACCEPT, AUTHORIZATION};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use super::errors::{PublishError, UPLOAD_FALLBACK};
use crate::output::serialize;
use crate::scenario::ScenarioDocument;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const SCENARIO_DIRECTORY: &str = "scenarios";

/// Personal access token plus the repository scenarios are pushed to.
///
/// Held only for the lifetime of a session and never written to disk.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RemoteCredential {
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl RemoteCredential {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        [&self.token, &self.owner, &self.repo]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Debug for RemoteCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCredential")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish()
    }
}

/// Remote host a generated scenario can be pushed to
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait ScenarioPublisher: Send + Sync {
    /// Single identity check; false on any non-success or transport failure
    async fn validate_credential(&self, token: &str) -> bool;

    /// PUT the document to `scenarios/<filename>` and return its web URL.
    ///
    /// Creates or silently overwrites; picking a unique name is the caller's job.
    async fn publish(
        &self,
        credential: &RemoteCredential,
        filename: &str,
        document: &ScenarioDocument,
    ) -> Result<String, PublishError>;
}

#[derive(Debug, Serialize)]
struct PutContentsRequest {
    message: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    content: Option<ContentsEntry>,
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    html_url: Option<String>,
}

/// GitHub contents API publisher backed by octocrab
#[derive(Debug, Clone)]
pub struct GitHubPublisher {
    api_base_url: String,
}

impl Default for GitHubPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl GitHubPublisher {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    // One attempt per request: octocrab's retry layer is switched off.
    fn client(&self, token: &str) -> Result<Octocrab, octocrab::Error> {
        Octocrab::builder()
            .base_uri(self.api_base_url.as_str())?
            .add_header(AUTHORIZATION, format!("token {token}"))
            .add_header(ACCEPT, GITHUB_ACCEPT.to_string())
            .add_retry_config(RetryConfig::None)
            .build()
    }
}

#[async_trait]
impl ScenarioPublisher for GitHubPublisher {
    async fn validate_credential(&self, token: &str) -> bool {
        if token.trim().is_empty() {
            return false;
        }

        let client = match self.client(token) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "Could not build GitHub client");
                return false;
            }
        };

        // Status only: any 2xx means the token is valid, whatever the body holds.
        match client._get("/user").await {
            Ok(response) if response.status().is_success() => {
                debug!("GitHub token accepted");
                true
            }
            Ok(response) => {
                debug!(status = %response.status(), "GitHub token rejected");
                false
            }
            Err(e) => {
                debug!(error = %e, "GitHub token check failed");
                false
            }
        }
    }

    async fn publish(
        &self,
        credential: &RemoteCredential,
        filename: &str,
        document: &ScenarioDocument,
    ) -> Result<String, PublishError> {
        if !credential.is_complete() {
            return Err(PublishError::MissingConfiguration);
        }

        let text = serialize(document)?;
        let body = PutContentsRequest {
            message: format!("Add form scenario: {filename}"),
            content: general_purpose::STANDARD.encode(text.as_bytes()),
        };
        let route = format!(
            "/repos/{}/{}/contents/{}/{}",
            encode_path_segment(&credential.owner),
            encode_path_segment(&credential.repo),
            SCENARIO_DIRECTORY,
            encode_path_segment(filename)
        );

        info!(
            repository = %credential.repository(),
            filename = filename,
            "Publishing scenario to GitHub"
        );

        let client = self.client(&credential.token).map_err(PublishError::from_octocrab)?;
        let response: PutContentsResponse = client
            .put(route, Some(&body))
            .await
            .map_err(PublishError::from_octocrab)?;

        let url = response
            .content
            .and_then(|entry| entry.html_url)
            .ok_or_else(|| PublishError::Transport(UPLOAD_FALLBACK.to_string()))?;

        info!(url = %url, "Scenario published");
        Ok(url)
    }
}

/// Connect flow: every field filled, then one live token check
pub async fn connect(
    publisher: &dyn ScenarioPublisher,
    credential: RemoteCredential,
) -> Result<RemoteCredential, PublishError> {
    if !credential.is_complete() {
        return Err(PublishError::IncompleteCredential);
    }

    if publisher.validate_credential(&credential.token).await {
        info!(repository = %credential.repository(), "Connected to GitHub");
        Ok(credential)
    } else {
        Err(PublishError::InvalidCredential)
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{sample_record, to_output};

    #[tokio::test]
    async fn test_publish_with_blank_token_fails_before_any_request() {
        // Unroutable base URL: reaching the network would surface as Transport instead.
        let publisher = GitHubPublisher::new("http://127.0.0.1:9");
        let credential = RemoteCredential::new("", "clinic", "scenarios");

        let err = publisher
            .publish(&credential, "case.json", &to_output(&sample_record()))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::MissingConfiguration));
    }

    #[tokio::test]
    async fn test_validate_blank_token_is_false() {
        let publisher = GitHubPublisher::new("http://127.0.0.1:9");
        assert!(!publisher.validate_credential("   ").await);
    }

    #[tokio::test]
    async fn test_connect_requires_every_field() {
        let mut publisher = MockScenarioPublisher::new();
        publisher.expect_validate_credential().times(0);

        let err = connect(&publisher, RemoteCredential::new("ghp_x", "clinic", " "))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::IncompleteCredential));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_token() {
        let mut publisher = MockScenarioPublisher::new();
        publisher
            .expect_validate_credential()
            .withf(|token| token == "ghp_bad")
            .times(1)
            .returning(|_| false);

        let err = connect(&publisher, RemoteCredential::new("ghp_bad", "clinic", "cases"))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_connect_returns_validated_credential() {
        let mut publisher = MockScenarioPublisher::new();
        publisher.expect_validate_credential().returning(|_| true);
        let credential = RemoteCredential::new("ghp_ok", "clinic", "cases");

        let connected = connect(&publisher, credential.clone()).await.unwrap();

        assert_eq!(connected, credential);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", RemoteCredential::new("ghp_secret", "clinic", "cases"));

        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("clinic"));
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("Scenario_2024-01-01T10-00-00.json"), "Scenario_2024-01-01T10-00-00.json");
        assert_eq!(encode_path_segment("chest pain/v2.json"), "chest%20pain%2Fv2.json");
        assert_eq!(encode_path_segment("é"), "%C3%A9");
    }
}
