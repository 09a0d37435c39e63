use http::Method;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub const DEFAULT_CORS_ORIGINS: &str = "*";

/// How long browsers may cache a preflight response.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(7200);

/// Build a CORS layer for the HTTP API with the given allowed origins.
///
/// Pass "*" in the origins list to allow all origins. Otherwise an origin is
/// allowed when it starts with one of the configured entries.
#[must_use]
pub fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    let allow_all_origins = cors_origins.iter().any(|o| o == "*");

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            if allow_all_origins {
                return true;
            }
            origin.to_str().is_ok_and(|origin_str| {
                cors_origins
                    .iter()
                    .any(|allowed| origin_str.starts_with(allowed.as_str()))
            })
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers(Any)
        .max_age(PREFLIGHT_MAX_AGE)
}
