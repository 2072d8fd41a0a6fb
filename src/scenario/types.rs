// Core types for clinical scenario records
//
// The same JSON shape is used for both representations. Field names and nesting
// are consumed verbatim by the simulation platform, so they are fixed here.

use serde::{Deserialize, Serialize};

/// Edit-format scenario: every leaf is a unitless free-text string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScenarioRecord {
    pub scenario_name: String,
    pub present_illness_history: PresentIllnessHistory,
    pub elicited_history: ElicitedHistory,
    pub interventions_and_recommendations: InterventionsAndRecommendations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PresentIllnessHistory {
    pub reason_for_presentation: String,
    pub vital_signs: VitalSigns,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VitalSigns {
    pub heart_rate: String,
    pub blood_pressure: String,
    pub oxygen_saturation: String,
    pub temperature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ElicitedHistory {
    pub past_medical_history: String,
    pub allergies: String,
    pub medications: String,
    pub labs: String,
    pub imagings: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InterventionsAndRecommendations {
    pub what_has_been_done: String,
    pub what_needs_to_be_done: String,
}

/// Output-format scenario with unit suffixes baked into the vitals.
///
/// Only `to_output` builds one from a record and only `to_edit` turns it back,
/// so the two representations cannot be mixed up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioDocument(ScenarioRecord);

impl ScenarioDocument {
    pub(crate) fn from_fields(fields: ScenarioRecord) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &ScenarioRecord {
        &self.0
    }

    pub(crate) fn into_fields(self) -> ScenarioRecord {
        self.0
    }

    pub fn scenario_name(&self) -> &str {
        &self.0.scenario_name
    }

    pub fn vital_signs(&self) -> &VitalSigns {
        &self.0.present_illness_history.vital_signs
    }
}

/// The four physiological measurements captured on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalSign {
    HeartRate,
    BloodPressure,
    OxygenSaturation,
    Temperature,
}

impl VitalSign {
    pub const ALL: [VitalSign; 4] = [
        VitalSign::HeartRate,
        VitalSign::BloodPressure,
        VitalSign::OxygenSaturation,
        VitalSign::Temperature,
    ];

    /// Suffix appended to a non-empty value in the output format
    pub fn unit_suffix(self) -> &'static str {
        match self {
            VitalSign::HeartRate => " bpm",
            VitalSign::BloodPressure => " mmHg",
            VitalSign::OxygenSaturation => "%",
            VitalSign::Temperature => " C",
        }
    }

    /// Unit shown next to the input box
    pub fn unit_label(self) -> &'static str {
        self.unit_suffix().trim_start()
    }

    /// Whether a typed character may be committed to this field
    pub fn accepts(self, c: char) -> bool {
        match self {
            VitalSign::HeartRate | VitalSign::OxygenSaturation => c.is_ascii_digit(),
            VitalSign::BloodPressure => c.is_ascii_digit() || c == '/',
            VitalSign::Temperature => c.is_ascii_digit() || c == '.',
        }
    }

    pub(crate) fn get(self, vitals: &VitalSigns) -> &str {
        match self {
            VitalSign::HeartRate => &vitals.heart_rate,
            VitalSign::BloodPressure => &vitals.blood_pressure,
            VitalSign::OxygenSaturation => &vitals.oxygen_saturation,
            VitalSign::Temperature => &vitals.temperature,
        }
    }

    pub(crate) fn slot(self, vitals: &mut VitalSigns) -> &mut String {
        match self {
            VitalSign::HeartRate => &mut vitals.heart_rate,
            VitalSign::BloodPressure => &mut vitals.blood_pressure,
            VitalSign::OxygenSaturation => &mut vitals.oxygen_saturation,
            VitalSign::Temperature => &mut vitals.temperature,
        }
    }
}

/// Every leaf of the form, in the order the form declares them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioField {
    ScenarioName,
    ReasonForPresentation,
    Vital(VitalSign),
    PastMedicalHistory,
    Allergies,
    Medications,
    Labs,
    Imagings,
    WhatHasBeenDone,
    WhatNeedsToBeDone,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 13] = [
        ScenarioField::ScenarioName,
        ScenarioField::ReasonForPresentation,
        ScenarioField::Vital(VitalSign::HeartRate),
        ScenarioField::Vital(VitalSign::BloodPressure),
        ScenarioField::Vital(VitalSign::OxygenSaturation),
        ScenarioField::Vital(VitalSign::Temperature),
        ScenarioField::PastMedicalHistory,
        ScenarioField::Allergies,
        ScenarioField::Medications,
        ScenarioField::Labs,
        ScenarioField::Imagings,
        ScenarioField::WhatHasBeenDone,
        ScenarioField::WhatNeedsToBeDone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScenarioField::ScenarioName => "Scenario Name",
            ScenarioField::ReasonForPresentation => "Reason for Presentation",
            ScenarioField::Vital(VitalSign::HeartRate) => "Heart Rate",
            ScenarioField::Vital(VitalSign::BloodPressure) => "Blood Pressure",
            ScenarioField::Vital(VitalSign::OxygenSaturation) => "O2 Saturation",
            ScenarioField::Vital(VitalSign::Temperature) => "Temperature",
            ScenarioField::PastMedicalHistory => "Past Medical History",
            ScenarioField::Allergies => "Allergies",
            ScenarioField::Medications => "Medications",
            ScenarioField::Labs => "Labs",
            ScenarioField::Imagings => "Imaging Results",
            ScenarioField::WhatHasBeenDone => "What Has Been Done",
            ScenarioField::WhatNeedsToBeDone => "What Needs To Be Done",
        }
    }

    /// Message reported when a required field is blank; `None` for optional fields
    pub fn required_message(self) -> Option<&'static str> {
        match self {
            ScenarioField::ScenarioName => Some("Scenario Name is required"),
            ScenarioField::ReasonForPresentation => Some("Reason for Presentation is required"),
            ScenarioField::Vital(_) => None,
            ScenarioField::PastMedicalHistory => Some("Past Medical History is required"),
            ScenarioField::Allergies => {
                Some("Allergies is required (enter \"None\" if no allergies)")
            }
            ScenarioField::Medications => {
                Some("Medications is required (enter \"None\" if no medications)")
            }
            ScenarioField::Labs => Some("Labs is required"),
            ScenarioField::Imagings => Some("Imaging Results is required"),
            ScenarioField::WhatHasBeenDone => Some("What Has Been Done is required"),
            ScenarioField::WhatNeedsToBeDone => Some("What Needs To Be Done is required"),
        }
    }

    pub fn vital(self) -> Option<VitalSign> {
        match self {
            ScenarioField::Vital(sign) => Some(sign),
            _ => None,
        }
    }
}

impl ScenarioRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ScenarioField) -> &str {
        match field {
            ScenarioField::ScenarioName => &self.scenario_name,
            ScenarioField::ReasonForPresentation => {
                &self.present_illness_history.reason_for_presentation
            }
            ScenarioField::Vital(sign) => sign.get(&self.present_illness_history.vital_signs),
            ScenarioField::PastMedicalHistory => &self.elicited_history.past_medical_history,
            ScenarioField::Allergies => &self.elicited_history.allergies,
            ScenarioField::Medications => &self.elicited_history.medications,
            ScenarioField::Labs => &self.elicited_history.labs,
            ScenarioField::Imagings => &self.elicited_history.imagings,
            ScenarioField::WhatHasBeenDone => {
                &self.interventions_and_recommendations.what_has_been_done
            }
            ScenarioField::WhatNeedsToBeDone => {
                &self.interventions_and_recommendations.what_needs_to_be_done
            }
        }
    }

    /// Copy of this record with one leaf replaced
    pub fn with_field(&self, field: ScenarioField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot(field) = value.into();
        next
    }

    fn slot(&mut self, field: ScenarioField) -> &mut String {
        match field {
            ScenarioField::ScenarioName => &mut self.scenario_name,
            ScenarioField::ReasonForPresentation => {
                &mut self.present_illness_history.reason_for_presentation
            }
            ScenarioField::Vital(sign) => sign.slot(&mut self.present_illness_history.vital_signs),
            ScenarioField::PastMedicalHistory => &mut self.elicited_history.past_medical_history,
            ScenarioField::Allergies => &mut self.elicited_history.allergies,
            ScenarioField::Medications => &mut self.elicited_history.medications,
            ScenarioField::Labs => &mut self.elicited_history.labs,
            ScenarioField::Imagings => &mut self.elicited_history.imagings,
            ScenarioField::WhatHasBeenDone => {
                &mut self.interventions_and_recommendations.what_has_been_done
            }
            ScenarioField::WhatNeedsToBeDone => {
                &mut self.interventions_and_recommendations.what_needs_to_be_done
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names_match_platform_schema() {
        let value = serde_json::to_value(ScenarioRecord::new()).unwrap();

        assert!(value.get("ScenarioName").is_some());
        let vitals = &value["PresentIllnessHistory"]["VitalSigns"];
        for key in ["HeartRate", "BloodPressure", "OxygenSaturation", "Temperature"] {
            assert_eq!(vitals[key], "", "missing vitals key {key}");
        }
        for key in ["PastMedicalHistory", "Allergies", "Medications", "Labs", "Imagings"] {
            assert_eq!(value["ElicitedHistory"][key], "", "missing history key {key}");
        }
        assert_eq!(value["InterventionsAndRecommendations"]["WhatHasBeenDone"], "");
        assert_eq!(value["InterventionsAndRecommendations"]["WhatNeedsToBeDone"], "");
    }

    #[test]
    fn test_partial_record_deserializes_with_blank_defaults() {
        let record: ScenarioRecord = serde_json::from_str(
            r#"{"ScenarioName": "Sepsis", "ElicitedHistory": {"Labs": "Lactate 4.1"}}"#,
        )
        .unwrap();

        assert_eq!(record.scenario_name, "Sepsis");
        assert_eq!(record.elicited_history.labs, "Lactate 4.1");
        assert_eq!(record.elicited_history.allergies, "");
        assert_eq!(record.present_illness_history.vital_signs, VitalSigns::default());
    }

    #[test]
    fn test_with_field_replaces_only_that_leaf() {
        let original = ScenarioRecord::new().with_field(ScenarioField::Labs, "CBC normal");
        let edited = original.with_field(ScenarioField::Vital(VitalSign::Temperature), "38.2");

        assert_eq!(original.get(ScenarioField::Vital(VitalSign::Temperature)), "");
        assert_eq!(edited.get(ScenarioField::Vital(VitalSign::Temperature)), "38.2");
        assert_eq!(edited.get(ScenarioField::Labs), "CBC normal");
    }

    #[test]
    fn test_every_field_is_addressable() {
        for (index, field) in ScenarioField::ALL.iter().enumerate() {
            let value = format!("value-{index}");
            let record = ScenarioRecord::new().with_field(*field, value.clone());
            assert_eq!(record.get(*field), value);
        }
    }

    #[test]
    fn test_vitals_are_the_only_optional_fields() {
        let optional: Vec<_> = ScenarioField::ALL
            .iter()
            .filter(|f| f.required_message().is_none())
            .collect();

        assert_eq!(optional.len(), 4);
        assert!(optional.iter().all(|f| f.vital().is_some()));
    }

    #[test]
    fn test_vital_character_sets() {
        assert!(VitalSign::HeartRate.accepts('7'));
        assert!(!VitalSign::HeartRate.accepts('/'));
        assert!(VitalSign::BloodPressure.accepts('/'));
        assert!(!VitalSign::BloodPressure.accepts('.'));
        assert!(VitalSign::Temperature.accepts('.'));
        assert!(!VitalSign::OxygenSaturation.accepts('%'));
        assert_eq!(VitalSign::BloodPressure.unit_label(), "mmHg");
        assert_eq!(VitalSign::OxygenSaturation.unit_label(), "%");
    }
}
