//! HTTP surface over the core operations.
//!
//! Every route sits under `/api` and requires the shared password in the
//! [`PASSWORD_HEADER`] header.
mod auth;
mod error;
mod handlers;

pub use auth::PASSWORD_HEADER;
pub use error::ApiError;

use crate::db::Db;
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    password: Arc<str>,
}

impl AppState {
    pub fn new(db: Db, password: &str) -> Self {
        Self {
            db,
            password: Arc::from(password),
        }
    }
}

/// Build the API router.
///
/// The router allows one parameter name per path position, so the
/// three-segment move route reuses `:key` for the destination topic.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/resources/:topic", get(handlers::list_resources))
        .route("/collections", get(handlers::list_collections))
        .route("/resource/:topic", post(handlers::create_resource))
        .route("/collection", post(handlers::create_collection))
        .route(
            "/resource/:topic/:key",
            put(handlers::update_resource).delete(handlers::delete_resource),
        )
        .route("/resource/add-pin/:topic/:key", put(handlers::add_pin))
        .route("/resource/remove-pin/:topic/:key", put(handlers::remove_pin))
        .route("/resource/:topic/:key/:id", put(handlers::move_resource))
        .route("/collection/:topic", axum::routing::delete(handlers::drop_collection))
        .route("/collection/:topic/:to", put(handlers::rename_collection))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_password,
        ))
        .with_state(state);
    Router::new().nest("/api", api)
}
