use super::types::{
    ElicitedHistory, InterventionsAndRecommendations, PresentIllnessHistory, ScenarioRecord,
    VitalSigns,
};

/// Fully populated chest pain scenario used by "Fill Sample"
pub fn sample_record() -> ScenarioRecord {
    ScenarioRecord {
        scenario_name: "Chest Pain Emergency".to_string(),
        present_illness_history: PresentIllnessHistory {
            reason_for_presentation: "Sudden severe chest pain, shortness of breath.".to_string(),
            vital_signs: VitalSigns {
                heart_rate: "110".to_string(),
                blood_pressure: "140/90".to_string(),
                oxygen_saturation: "92".to_string(),
                temperature: "37.3".to_string(),
            },
        },
        elicited_history: ElicitedHistory {
            past_medical_history: "Hypertension, Hyperlipidemia".to_string(),
            allergies: "Penicillin".to_string(),
            medications: "Aspirin, Atorvastatin".to_string(),
            labs: "Troponin elevated, ECG abnormal".to_string(),
            imagings: "Chest X-ray normal, ECG shows ST elevation".to_string(),
        },
        interventions_and_recommendations: InterventionsAndRecommendations {
            what_has_been_done: "Oxygen started, Aspirin given".to_string(),
            what_needs_to_be_done: "Immediate cardiac consult, Blood draw for further labs"
                .to_string(),
        },
    }
}
