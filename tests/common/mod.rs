//! Common test utilities

use linkshelf::{Db, DocumentStore, FsStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Open a file store under `dir` and wrap it with the default sanitizer
pub async fn open_db(dir: &TempDir) -> Db {
    let store: Arc<dyn DocumentStore> = Arc::new(
        FsStore::open(dir.path().join("data"))
            .await
            .expect("Failed to open store"),
    );
    Db::with_default_sanitizer(store)
}
