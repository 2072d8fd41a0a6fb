use thiserror::Error;

use crate::output::OutputError;

pub(crate) const UPLOAD_FALLBACK: &str = "Failed to upload to GitHub";
pub(crate) const NETWORK_FALLBACK: &str = "Network error connecting to GitHub";

#[derive(Debug, Error)]
pub enum PublishError {
    /// Token, owner or repo blank when publishing; raised before any request
    #[error("Missing GitHub configuration.")]
    MissingConfiguration,
    /// Connect form submitted with a blank field
    #[error("Please fill in all fields.")]
    IncompleteCredential,
    #[error("Invalid Personal Access Token. Please check your permissions.")]
    InvalidCredential,
    /// Non-success response; `message` is GitHub's own when it sent one
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("failed to encode scenario: {0}")]
    Encoding(#[from] OutputError),
}

impl PublishError {
    pub(crate) fn from_octocrab(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let message = if source.message.trim().is_empty() {
                    UPLOAD_FALLBACK.to_string()
                } else {
                    source.message.clone()
                };
                PublishError::Remote {
                    status: source.status_code.as_u16(),
                    message,
                }
            }
            octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
                tracing::warn!(error = %err, "Unreadable GitHub response");
                PublishError::Transport(UPLOAD_FALLBACK.to_string())
            }
            other => {
                tracing::warn!(error = %other, "GitHub request failed");
                PublishError::Transport(NETWORK_FALLBACK.to_string())
            }
        }
    }

    /// Hints shown under the error in the terminal
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            PublishError::MissingConfiguration | PublishError::IncompleteCredential => &[
                "Set a token: export GITHUB_TOKEN=your_token",
                "Set the target: [github] owner/repo in scenario-builder.toml",
                "Or pass --owner and --repo",
            ],
            PublishError::InvalidCredential => &[
                "Create token at: https://github.com/settings/tokens",
                "Token needs 'repo' scope",
            ],
            PublishError::Remote { status: 401, .. } => &[
                "Token is invalid or expired",
                "Create token at: https://github.com/settings/tokens",
            ],
            PublishError::Remote { status: 403, .. } => &[
                "Token lacks required permissions",
                "May need 'repo' scope: https://github.com/settings/tokens",
            ],
            PublishError::Remote { status: 404, .. } => &[
                "Repository may not exist or be private",
                "Check the configured owner and repo",
            ],
            PublishError::Remote { status: 422, .. } => &[
                "A file with this name may already exist without a matching sha",
                "Choose a different filename",
            ],
            PublishError::Remote { .. } => &["Check GitHub status: https://status.github.com"],
            PublishError::Transport(_) => &[
                "Test connection: curl -I https://api.github.com",
                "Check firewall/proxy settings",
            ],
            PublishError::Encoding(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_user_facing_text() {
        assert_eq!(
            PublishError::MissingConfiguration.to_string(),
            "Missing GitHub configuration."
        );
        assert_eq!(
            PublishError::InvalidCredential.to_string(),
            "Invalid Personal Access Token. Please check your permissions."
        );
        let remote = PublishError::Remote {
            status: 409,
            message: "is at 3f2a but expected 9c1d".to_string(),
        };
        assert_eq!(remote.to_string(), "is at 3f2a but expected 9c1d");
    }

    #[test]
    fn test_remediation_is_status_specific() {
        let not_found = PublishError::Remote {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(not_found.remediation()[0].contains("Repository"));
        assert!(PublishError::Encoding(OutputError::Serialization(
            serde_json::from_str::<u8>("x").unwrap_err()
        ))
        .remediation()
        .is_empty());
    }
}
