use crate::error::CoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

/// A failed request.
///
/// Unauthorized maps to 401 and a dropped-but-missing topic to 404; every
/// other failure is a 400 with a generic body, the cause going to the log.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    /// Update or delete of a resource that does not exist.
    MissingResource(CoreError),
    TopicNotFound,
}

impl ApiError {
    /// Like `From<CoreError>`, but reports a missing resource distinctly.
    pub fn resource(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(_) => ApiError::MissingResource(err),
            other => ApiError::Core(other),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(CoreError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Core(CoreError::Unauthorized) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::Core(err) => {
                warn!(code = err.code(), error = %err, "Request failed");
                (StatusCode::BAD_REQUEST, "Bad Request")
            }
            ApiError::MissingResource(err) => {
                warn!(code = err.code(), error = %err, "Request failed");
                (StatusCode::BAD_REQUEST, "Resource could not be found.")
            }
            ApiError::TopicNotFound => (StatusCode::NOT_FOUND, "Not Found"),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
