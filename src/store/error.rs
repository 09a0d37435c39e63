use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by a [`DocumentStore`](super::DocumentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    #[error("Collection already exists: {0}")]
    CollectionExists(String),
    #[error("Invalid collection name: {0}")]
    InvalidCollectionName(String),
    #[error("Corrupt document at {}", .0.display())]
    CorruptDocument(PathBuf),
}
