use std::fmt;

use super::types::{ScenarioField, ScenarioRecord};

/// Ordered messages for every required field left blank.
///
/// Empty means the record may proceed to review or generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Please fill in all required fields:")?;
        for message in &self.0 {
            writeln!(f, "  • {message}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check the nine required fields in form order. Vitals are optional.
pub fn validate(record: &ScenarioRecord) -> ValidationErrors {
    let messages = ScenarioField::ALL
        .iter()
        .filter_map(|field| {
            let message = field.required_message()?;
            record.get(*field).trim().is_empty().then(|| message.to_string())
        })
        .collect();

    ValidationErrors(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::sample::sample_record;
    use crate::scenario::types::VitalSign;

    #[test]
    fn test_empty_record_reports_all_nine_in_order() {
        let errors = validate(&ScenarioRecord::new());

        assert_eq!(
            errors.messages(),
            &[
                "Scenario Name is required",
                "Reason for Presentation is required",
                "Past Medical History is required",
                "Allergies is required (enter \"None\" if no allergies)",
                "Medications is required (enter \"None\" if no medications)",
                "Labs is required",
                "Imaging Results is required",
                "What Has Been Done is required",
                "What Needs To Be Done is required",
            ]
        );
    }

    #[test]
    fn test_sample_record_is_valid() {
        assert!(validate(&sample_record()).is_empty());
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let record = sample_record().with_field(ScenarioField::Allergies, " \t\n");
        let errors = validate(&record);

        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().starts_with("Allergies is required"));
    }

    #[test]
    fn test_blank_vitals_do_not_fail_validation() {
        let record = VitalSign::ALL.iter().fold(sample_record(), |record, sign| {
            record.with_field(ScenarioField::Vital(*sign), "")
        });

        assert!(validate(&record).is_empty());
    }

    #[test]
    fn test_display_lists_every_message() {
        let record = sample_record()
            .with_field(ScenarioField::Labs, "")
            .with_field(ScenarioField::ScenarioName, "");
        let rendered = validate(&record).to_string();

        assert!(rendered.starts_with("Please fill in all required fields:"));
        let name_at = rendered.find("Scenario Name is required").unwrap();
        let labs_at = rendered.find("Labs is required").unwrap();
        assert!(name_at < labs_at);
    }
}
