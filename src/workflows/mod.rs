// Workflow orchestration modules
// Edit -> Review -> Result, replaced wholesale on every action

pub mod state_machine;

pub use state_machine::{reduce, Stage, WorkflowAction, WorkflowState};
