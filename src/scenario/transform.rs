//! Conversion between the edit format and the output format.
//!
//! Only the vitals differ between the two: a non-blank vital gets its unit
//! suffix appended on the way out and stripped by exact match on the way back.
//! Every other leaf passes through untouched.

use super::types::{ScenarioDocument, ScenarioRecord, VitalSign};

/// Bake unit suffixes into every non-blank vital
pub fn to_output(record: &ScenarioRecord) -> ScenarioDocument {
    let mut fields = record.clone();
    let vitals = &mut fields.present_illness_history.vital_signs;

    for sign in VitalSign::ALL {
        let slot = sign.slot(vitals);
        if !slot.trim().is_empty() {
            slot.push_str(sign.unit_suffix());
        }
    }

    ScenarioDocument::from_fields(fields)
}

/// Strip the unit suffix from every vital that carries one
pub fn to_edit(document: &ScenarioDocument) -> ScenarioRecord {
    let mut fields = document.clone().into_fields();
    let vitals = &mut fields.present_illness_history.vital_signs;

    for sign in VitalSign::ALL {
        let slot = sign.slot(vitals);
        if let Some(stripped) = slot.strip_suffix(sign.unit_suffix()) {
            *slot = stripped.to_string();
        }
    }

    fields
}

impl VitalSign {
    /// Drop every character this vital does not accept.
    ///
    /// Applied to the whole inserted text before it is committed, so a
    /// disallowed character simply never appears.
    pub fn filter_input(self, input: &str) -> String {
        input.chars().filter(|c| self.accepts(*c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::sample::sample_record;
    use crate::scenario::types::ScenarioField;
    use proptest::prelude::*;

    #[test]
    fn test_to_output_appends_units_to_sample_vitals() {
        let document = to_output(&sample_record());
        let vitals = document.vital_signs();

        assert_eq!(vitals.heart_rate, "110 bpm");
        assert_eq!(vitals.blood_pressure, "140/90 mmHg");
        assert_eq!(vitals.oxygen_saturation, "92%");
        assert_eq!(vitals.temperature, "37.3 C");
        assert_eq!(document.scenario_name(), "Chest Pain Emergency");
    }

    #[test]
    fn test_to_output_leaves_blank_vitals_blank() {
        let record = ScenarioRecord::new()
            .with_field(ScenarioField::Vital(VitalSign::HeartRate), "88")
            .with_field(ScenarioField::Vital(VitalSign::Temperature), "   ");

        let vitals = to_output(&record).vital_signs().clone();

        assert_eq!(vitals.heart_rate, "88 bpm");
        assert_eq!(vitals.blood_pressure, "");
        assert_eq!(vitals.oxygen_saturation, "");
        assert_eq!(vitals.temperature, "   ");
    }

    #[test]
    fn test_to_output_does_not_touch_free_text() {
        let record = ScenarioRecord::new().with_field(ScenarioField::Labs, "HR 110 bpm on arrival");
        let document = to_output(&record);

        assert_eq!(document.fields().get(ScenarioField::Labs), "HR 110 bpm on arrival");
    }

    #[test]
    fn test_to_edit_strips_only_the_exact_suffix() {
        let document: ScenarioDocument = serde_json::from_value(serde_json::json!({
            "PresentIllnessHistory": {
                "VitalSigns": {
                    "HeartRate": "110 bpm",
                    "BloodPressure": "140/90mmHg",
                    "OxygenSaturation": "92%",
                    "Temperature": ""
                }
            }
        }))
        .unwrap();

        let vitals = to_edit(&document).present_illness_history.vital_signs;

        assert_eq!(vitals.heart_rate, "110");
        assert_eq!(vitals.blood_pressure, "140/90mmHg");
        assert_eq!(vitals.oxygen_saturation, "92");
        assert_eq!(vitals.temperature, "");
    }

    #[test]
    fn test_filter_input_drops_disallowed_characters() {
        assert_eq!(VitalSign::BloodPressure.filter_input("14a0/90"), "140/90");
        assert_eq!(VitalSign::HeartRate.filter_input("1 1-0x"), "110");
        assert_eq!(VitalSign::Temperature.filter_input("37,5.2C"), "375.2");
        assert_eq!(VitalSign::OxygenSaturation.filter_input("95%"), "95");
    }

    fn any_record() -> impl Strategy<Value = ScenarioRecord> {
        proptest::collection::vec(".*", ScenarioField::ALL.len()).prop_map(|values| {
            ScenarioField::ALL
                .iter()
                .zip(values)
                .fold(ScenarioRecord::new(), |record, (field, value)| {
                    record.with_field(*field, value)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_edit_output_round_trip_is_exact(record in any_record()) {
            prop_assert_eq!(to_edit(&to_output(&record)), record);
        }

        #[test]
        fn prop_filtered_input_only_contains_accepted_characters(input in ".*") {
            for sign in VitalSign::ALL {
                let filtered = sign.filter_input(&input);
                prop_assert!(filtered.chars().all(|c| sign.accepts(c)));
                prop_assert_eq!(sign.filter_input(&filtered), filtered.clone());
            }
        }
    }
}
