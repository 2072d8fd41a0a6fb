use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging on stderr.
///
/// RUST_LOG wins over the configured level. Stdout is left untouched so
/// generated JSON can be piped.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!("Scenario builder telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the operations of one session
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping everything done in one interactive session
pub fn create_session_span(session_id: &str, entry: &str) -> tracing::Span {
    tracing::info_span!(
        "scenario_session",
        session.id = session_id,
        session.entry = entry
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
