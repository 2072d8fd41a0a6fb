use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::Arc;

use super::read_json;
use crate::fs::FileSystemOperations;
use crate::output::{default_filename_now, download, serialize};
use crate::scenario::{ScenarioDocument, ScenarioRecord};
use crate::workflows::{reduce, WorkflowAction, WorkflowState};

/// Non-interactive Review + Generate of an edit-format record
pub struct GenerateCommand {
    pub record: PathBuf,
    pub filename: Option<String>,
    pub output_dir: PathBuf,
    pub to_stdout: bool,
    fs_ops: Arc<dyn FileSystemOperations>,
}

impl GenerateCommand {
    pub fn new(record: PathBuf, output_dir: PathBuf, fs_ops: Arc<dyn FileSystemOperations>) -> Self {
        Self {
            record,
            filename: None,
            output_dir,
            to_stdout: false,
            fs_ops,
        }
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn with_stdout(mut self, to_stdout: bool) -> Self {
        self.to_stdout = to_stdout;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let record: ScenarioRecord = read_json(&self.record)?;
        let document = generate(record)?;
        let text = serialize(&document)?;

        if self.to_stdout {
            println!("{text}");
            return Ok(());
        }

        let filename = self.filename.clone().unwrap_or_else(default_filename_now);
        let path = download(self.fs_ops.as_ref(), &self.output_dir, &text, &filename).await?;
        println!("💾 Saved {}", path.display());
        Ok(())
    }
}

// Runs the same transitions as the interactive session so both paths validate identically.
fn generate(record: ScenarioRecord) -> Result<ScenarioDocument> {
    let state = WorkflowState::Editing {
        record,
        errors: Default::default(),
    };
    let state = reduce(reduce(state, WorkflowAction::Review), WorkflowAction::Generate);

    match state {
        WorkflowState::Result { document } => Ok(document),
        WorkflowState::Editing { errors, .. } => {
            println!("❗ {errors}");
            bail!("Scenario has {} missing required field(s)", errors.len())
        }
        WorkflowState::Reviewing { .. } => bail!("Scenario could not be generated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MockFileSystemOperations, StandardFileSystem};
    use crate::scenario::{sample_record, ScenarioField};
    use std::path::Path;

    fn write_record(dir: &Path, record: &ScenarioRecord) -> PathBuf {
        let path = dir.join("record.json");
        std::fs::write(&path, serde_json::to_string(record).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_generate_bakes_units() {
        let document = generate(sample_record()).unwrap();

        assert_eq!(document.vital_signs().blood_pressure, "140/90 mmHg");
        assert_eq!(document.vital_signs().oxygen_saturation, "92%");
    }

    #[test]
    fn test_generate_rejects_missing_fields() {
        let record = sample_record()
            .with_field(ScenarioField::Labs, "")
            .with_field(ScenarioField::Imagings, "  ");

        let err = generate(record).unwrap_err();

        assert!(err.to_string().contains("2 missing required field(s)"));
    }

    #[tokio::test]
    async fn test_execute_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let record_path = write_record(dir.path(), &sample_record());
        let out_dir = dir.path().join("exports");

        GenerateCommand::new(record_path, out_dir.clone(), Arc::new(StandardFileSystem))
            .with_filename(Some("chest-pain".to_string()))
            .execute()
            .await
            .unwrap();

        let written = std::fs::read_to_string(out_dir.join("chest-pain.json")).unwrap();
        assert!(written.contains("\"HeartRate\": \"110 bpm\""));
    }

    #[tokio::test]
    async fn test_execute_to_stdout_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let record_path = write_record(dir.path(), &sample_record());
        let mut mock_fs = MockFileSystemOperations::new();
        mock_fs.expect_write().times(0);
        mock_fs.expect_create_dir_all().times(0);

        GenerateCommand::new(record_path, PathBuf::from("."), Arc::new(mock_fs))
            .with_stdout(true)
            .execute()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_execute_invalid_record_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let record_path = write_record(dir.path(), &ScenarioRecord::new());
        let mut mock_fs = MockFileSystemOperations::new();
        mock_fs.expect_write().times(0);

        let result = GenerateCommand::new(record_path, PathBuf::from("."), Arc::new(mock_fs))
            .execute()
            .await;

        assert!(result.is_err());
    }
}
