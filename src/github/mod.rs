pub mod client;
pub mod errors;

pub use client::{connect, GitHubPublisher, RemoteCredential, ScenarioPublisher, DEFAULT_API_BASE_URL};
pub use errors::PublishError;

#[cfg(any(test, feature = "testing"))]
pub use client::MockScenarioPublisher;
