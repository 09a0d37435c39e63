use crate::db::Db;
use crate::store::FsStore;
use std::sync::Arc;
use tempfile::TempDir;

/// A `Db` over a fresh file store in a temp directory. Keep the `TempDir`
/// alive for the duration of the test.
pub async fn test_db() -> (TempDir, Db) {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path().join("data")).await.unwrap();
    (temp, Db::with_default_sanitizer(Arc::new(store)))
}
