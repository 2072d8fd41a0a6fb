// Clinical scenario model: record shape, unit transforms, validation

pub mod sample;
pub mod transform;
pub mod types;
pub mod validation;

pub use sample::sample_record;
pub use transform::{to_edit, to_output};
pub use types::{
    ElicitedHistory, InterventionsAndRecommendations, PresentIllnessHistory, ScenarioDocument,
    ScenarioField, ScenarioRecord, VitalSign, VitalSigns,
};
pub use validation::{validate, ValidationErrors};
