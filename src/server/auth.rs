use super::{ApiError, AppState};
use crate::error::CoreError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use cmov::Cmov;

/// Header carrying the shared API password.
pub const PASSWORD_HEADER: &str = "x-password";

/// Compare a supplied password with the expected one without exiting early
/// on the first differing byte. Only the length can leak.
pub(super) fn passwords_match(supplied: &[u8], expected: &[u8]) -> bool {
    if supplied.len() != expected.len() {
        return false;
    }
    let mut equal = 1u8;
    for (a, b) in supplied.iter().zip(expected) {
        equal.cmovz(&0u8, u8::from(a == b));
    }
    equal != 0u8
}

/// Reject requests whose password header is missing or wrong.
pub(super) async fn require_password(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(PASSWORD_HEADER)
        .is_some_and(|value| passwords_match(value.as_bytes(), state.password.as_bytes()));
    if authorized {
        next.run(request).await
    } else {
        ApiError::Core(CoreError::Unauthorized).into_response()
    }
}
