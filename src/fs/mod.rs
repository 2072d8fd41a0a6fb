/// File system operations abstraction for testing
///
/// Scenario files are written through this trait so the download path can be
/// exercised with the `mockall`-generated `MockFileSystemOperations` instead
/// of touching disk.
///
/// # Examples
///
/// ```rust,no_run
/// use scenario_builder::fs::{FileSystemOperations, StandardFileSystem};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let fs_ops: Arc<dyn FileSystemOperations> = Arc::new(StandardFileSystem);
///
///     fs_ops.create_dir_all(Path::new("scenarios")).await?;
///     fs_ops.write(Path::new("scenarios/chest-pain.json"), b"{}").await?;
///
///     if fs_ops.exists(Path::new("scenarios/chest-pain.json")) {
///         println!("Scenario written");
///     }
///
///     Ok(())
/// }
/// ```
use anyhow::Result;
use std::path::Path;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Trait for file system operations that can be mocked in tests
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait::async_trait]
pub trait FileSystemOperations: Send + Sync {
    /// Create a directory and all its parent directories
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Write data to a file, creating the file if it doesn't exist
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Production implementation backed by `tokio::fs`
pub struct StandardFileSystem;

#[async_trait::async_trait]
impl FileSystemOperations for StandardFileSystem {
    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path).await.map_err(Into::into)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        tokio::fs::write(path, contents).await.map_err(Into::into)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_standard_file_system_writes_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/scenarios");
        let file = nested.join("a.json");
        let fs_ops = StandardFileSystem;

        fs_ops.create_dir_all(&nested).await.unwrap();
        fs_ops.write(&file, b"{}").await.unwrap();

        assert!(fs_ops.exists(&file));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{}");
    }
}
