//! Atomic document writes.
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write content to a file atomically using a temporary file.
///
/// The temp file is created next to the target (required for an atomic
/// rename) and is removed automatically if any step fails, so readers see
/// either the old document or the new one, never a partial write.
pub(super) async fn atomic_write(path: &Path, content: Vec<u8>) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?
        .to_path_buf();
    let target_path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> io::Result<()> {
        use std::io::Write;

        let mut temp_file = NamedTempFile::new_in(&parent)?;
        temp_file.write_all(&content)?;
        temp_file.flush()?;
        temp_file.persist(&target_path)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("doc.json");

        atomic_write(&file_path, br#"{"key": "value"}"#.to_vec())
            .await
            .unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, r#"{"key": "value"}"#);
    }

    #[tokio::test]
    async fn test_atomic_write_overwrites_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("doc.json");
        std::fs::write(&file_path, "initial").unwrap();

        atomic_write(&file_path, b"updated".to_vec()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "updated");
        let count = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(count, 1, "Should only have the target file, no temp files");
    }

    #[tokio::test]
    async fn test_atomic_write_fails_with_invalid_parent() {
        let result = atomic_write(Path::new("/nonexistent/deeply/nested/doc.json"), Vec::new()).await;
        assert!(result.is_err());
    }
}
