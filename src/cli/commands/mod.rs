use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::github::PublishError;

pub mod generate;
pub mod init;
pub mod publish;
pub mod sample;
pub mod session;

/// Read and parse a scenario JSON file
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub(crate) fn report_publish_error(err: &PublishError) {
    println!("❌ {err}");
    let hints = err.remediation();
    if !hints.is_empty() {
        println!();
        println!("🔧 QUICK FIXES:");
        for hint in hints {
            println!("   → {hint}");
        }
    }
}

pub async fn show_how_to_get_work() -> Result<()> {
    println!("🩺 Scenario Builder - Clinical Simulation Scenarios");
    println!();
    println!("Workflow:");
    println!("  📝 Fill     scenario-builder new            # Open the scenario form");
    println!("  🔍 Review   (in session) review              # Confirm the details");
    println!("  📦 Download (in session) generate, download  # Save the JSON document");
    println!();
    println!("Other commands:");
    println!("  🧪 scenario-builder sample        # Print the sample scenario");
    println!("  ⚙️  scenario-builder generate      # Generate from a record file");
    println!("  🐙 scenario-builder publish       # Upload a document to GitHub");
    println!("  🔑 scenario-builder check-token   # Verify your GitHub token");
    println!("  🛠️  scenario-builder init-config   # Write scenario-builder.toml");
    println!();
    println!("💡 Start with 'scenario-builder new --sample' to see a complete scenario!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioRecord;

    #[test]
    fn test_read_json_accepts_partial_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"ScenarioName": "Sepsis", "Unknown": 1}"#).unwrap();

        let record: ScenarioRecord = read_json(&path).unwrap();

        assert_eq!(record.scenario_name, "Sepsis");
        assert_eq!(record.elicited_history.labs, "");
    }

    #[test]
    fn test_read_json_names_the_file_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json::<ScenarioRecord>(&path).unwrap_err();

        assert!(err.to_string().contains("broken.json"));
    }
}
