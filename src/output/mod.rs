//! Emission of generated scenarios: JSON text, file naming and local download.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::fs::FileSystemOperations;
use crate::scenario::ScenarioDocument;

const FALLBACK_STEM: &str = "scenario";
const JSON_EXTENSION: &str = ".json";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize scenario: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to write {}: {reason:#}", .path.display())]
    Write { path: PathBuf, reason: anyhow::Error },
}

/// Indented JSON with keys in declaration order
pub fn serialize(document: &ScenarioDocument) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// `Scenario_<timestamp>` with `:` and `.` replaced by `-`, whole seconds only
pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("Scenario_{}", now.format("%Y-%m-%dT%H-%M-%S"))
}

pub fn default_filename_now() -> String {
    default_filename(Utc::now())
}

/// Final on-disk name: trimmed, `scenario` when blank, always ending in `.json`.
///
/// Path separators become `-` so the result is a single file name inside the
/// output directory. A name that already ends in `.json` (any case) is left alone.
pub fn normalize_filename(input: &str) -> String {
    let flattened = input.trim().replace(['/', '\\'], "-");
    let stem = if flattened.is_empty() {
        FALLBACK_STEM
    } else {
        flattened.as_str()
    };

    if stem.to_ascii_lowercase().ends_with(JSON_EXTENSION) {
        stem.to_string()
    } else {
        format!("{stem}{JSON_EXTENSION}")
    }
}

/// Write `text` into `directory` under the normalized filename and return the path
pub async fn download(
    fs_ops: &dyn FileSystemOperations,
    directory: &Path,
    text: &str,
    filename: &str,
) -> Result<PathBuf, OutputError> {
    let path = directory.join(normalize_filename(filename));

    if !fs_ops.exists(directory) {
        fs_ops
            .create_dir_all(directory)
            .await
            .map_err(|reason| OutputError::Write {
                path: directory.to_path_buf(),
                reason,
            })?;
    }

    fs_ops
        .write(&path, text.as_bytes())
        .await
        .map_err(|reason| OutputError::Write {
            path: path.clone(),
            reason,
        })?;

    info!(path = %path.display(), bytes = text.len(), "Scenario downloaded");
    Ok(path)
}
