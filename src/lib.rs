// Scenario Builder Library - Clinical Simulation Scenario Authoring
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod fs;
pub mod github;
pub mod output;
pub mod scenario;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use config::ScenarioBuilderConfig;
pub use fs::{FileSystemOperations, StandardFileSystem};
pub use github::{GitHubPublisher, PublishError, RemoteCredential, ScenarioPublisher};
pub use output::{default_filename, normalize_filename, serialize, OutputError};
pub use scenario::{
    sample_record, to_edit, to_output, validate, ScenarioDocument, ScenarioField, ScenarioRecord,
    ValidationErrors, VitalSign,
};
pub use telemetry::{create_session_span, generate_session_id, init_telemetry};
pub use workflows::{reduce, Stage, WorkflowAction, WorkflowState};
