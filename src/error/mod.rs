//! Error taxonomy shared by every core operation.
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CollectionNotFound(name) => CoreError::NotFound(name),
            StoreError::CollectionExists(name) => CoreError::Conflict(name),
            StoreError::InvalidCollectionName(name) => {
                CoreError::Validation(format!("invalid topic name {name:?}"))
            }
            other => CoreError::Store(other),
        }
    }
}

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        CoreError::NotFound(what.into())
    }

    /// Stable code used in logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Unauthorized => "UNAUTHORIZED",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::Store(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
