// Scenario workflow: Editing -> Reviewing -> Result, driven by a pure reducer.
// Each action consumes the current state and yields the next one; nothing is
// mutated in place, so every transition can be exercised without a terminal.

use crate::scenario::{
    sample_record, to_edit, to_output, validate, ScenarioDocument, ScenarioField, ScenarioRecord,
    ValidationErrors,
};

/// Which view the workflow is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Editing,
    Reviewing,
    Result,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Editing => "editing",
            Stage::Reviewing => "reviewing",
            Stage::Result => "result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Form is open; `errors` holds the last failed validation, cleared on any edit
    Editing {
        record: ScenarioRecord,
        errors: ValidationErrors,
    },
    /// Read-only confirmation of a validated record
    Reviewing { record: ScenarioRecord },
    /// Generated document awaiting download or publish
    Result { document: ScenarioDocument },
}

/// User actions that drive the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    SetField { field: ScenarioField, value: String },
    LoadSample,
    Review,
    Edit,
    Generate,
    BackToReview,
    Reset,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowState {
    /// Fresh workflow: empty form, no errors
    pub fn new() -> Self {
        WorkflowState::Editing {
            record: ScenarioRecord::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Resume from a previously generated document, landing on the review view
    pub fn from_document(document: &ScenarioDocument) -> Self {
        WorkflowState::Reviewing {
            record: to_edit(document),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            WorkflowState::Editing { .. } => Stage::Editing,
            WorkflowState::Reviewing { .. } => Stage::Reviewing,
            WorkflowState::Result { .. } => Stage::Result,
        }
    }

    pub fn record(&self) -> Option<&ScenarioRecord> {
        match self {
            WorkflowState::Editing { record, .. } | WorkflowState::Reviewing { record } => {
                Some(record)
            }
            WorkflowState::Result { .. } => None,
        }
    }

    pub fn document(&self) -> Option<&ScenarioDocument> {
        match self {
            WorkflowState::Result { document } => Some(document),
            _ => None,
        }
    }

    /// Validation errors currently on display; empty outside of editing
    pub fn errors(&self) -> &[String] {
        match self {
            WorkflowState::Editing { errors, .. } => errors.messages(),
            _ => &[],
        }
    }
}

/// Apply one action and return the resulting state
pub fn reduce(state: WorkflowState, action: WorkflowAction) -> WorkflowState {
    let from = state.stage();

    let next = match (state, action) {
        (WorkflowState::Editing { record, .. }, WorkflowAction::SetField { field, value }) => {
            let value = match field.vital() {
                Some(sign) => sign.filter_input(&value),
                None => value,
            };
            WorkflowState::Editing {
                record: record.with_field(field, value),
                errors: ValidationErrors::new(),
            }
        }

        (WorkflowState::Editing { .. }, WorkflowAction::LoadSample) => WorkflowState::Editing {
            record: sample_record(),
            errors: ValidationErrors::new(),
        },
        (WorkflowState::Reviewing { .. }, WorkflowAction::LoadSample) => {
            WorkflowState::Reviewing {
                record: sample_record(),
            }
        }

        (WorkflowState::Editing { record, .. }, WorkflowAction::Review) => {
            let errors = validate(&record);
            if errors.is_empty() {
                WorkflowState::Reviewing { record }
            } else {
                tracing::info!(error_count = errors.len(), "Review blocked by validation");
                WorkflowState::Editing { record, errors }
            }
        }

        (WorkflowState::Reviewing { record }, WorkflowAction::Edit) => WorkflowState::Editing {
            record,
            errors: ValidationErrors::new(),
        },

        (WorkflowState::Reviewing { record }, WorkflowAction::Generate) => {
            let errors = validate(&record);
            if errors.is_empty() {
                WorkflowState::Result {
                    document: to_output(&record),
                }
            } else {
                tracing::info!(error_count = errors.len(), "Generate blocked by validation");
                WorkflowState::Editing { record, errors }
            }
        }

        (WorkflowState::Result { document }, WorkflowAction::BackToReview) => {
            WorkflowState::from_document(&document)
        }

        (_, WorkflowAction::Reset) => WorkflowState::new(),

        (state, action) => {
            tracing::debug!(stage = %from, ?action, "Action ignored in current stage");
            state
        }
    };

    let to = next.stage();
    if from != to {
        tracing::info!(from = %from, to = %to, "Workflow transition");
    }
    next
}
