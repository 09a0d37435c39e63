use super::{ApiError, AppState};
use crate::error::CoreError;
use crate::resource::{self, NewResource, Resource, ResourceFields};
use crate::{mover, pin, topic};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(super) struct ResourcesResponse {
    docs: Vec<Resource>,
    namespaces: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct NamespacesResponse {
    namespaces: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreatedNamespaceResponse {
    new_namespace: String,
    namespaces: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RenamedNamespaceResponse {
    updated_collection: String,
    namespaces: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct DroppedResponse {
    dropped: bool,
}

#[derive(Deserialize)]
pub(super) struct CreateCollectionBody {
    collection: Option<String>,
}

pub(super) async fn list_resources(
    State(state): State<AppState>,
    Path(topic_name): Path<String>,
) -> Result<Json<ResourcesResponse>, ApiError> {
    let docs = resource::list(&state.db, &topic_name).await?;
    let namespaces = topic::list_topics(&state.db).await?;
    Ok(Json(ResourcesResponse { docs, namespaces }))
}

pub(super) async fn list_collections(
    State(state): State<AppState>,
) -> Result<Json<NamespacesResponse>, ApiError> {
    let namespaces = topic::list_topics(&state.db).await?;
    Ok(Json(NamespacesResponse { namespaces }))
}

pub(super) async fn create_resource(
    State(state): State<AppState>,
    Path(topic_name): Path<String>,
    body: Result<Json<NewResource>, JsonRejection>,
) -> Result<Json<Resource>, ApiError> {
    let Json(new) = body?;
    Ok(Json(resource::create(&state.db, &topic_name, &new).await?))
}

pub(super) async fn create_collection(
    State(state): State<AppState>,
    body: Result<Json<CreateCollectionBody>, JsonRejection>,
) -> Result<Json<CreatedNamespaceResponse>, ApiError> {
    let Json(body) = body?;
    let name = body
        .collection
        .ok_or_else(|| CoreError::validation("collection is required"))?;
    let change = topic::create_topic(&state.db, &name).await?;
    Ok(Json(CreatedNamespaceResponse {
        new_namespace: change.name,
        namespaces: change.topics,
    }))
}

pub(super) async fn update_resource(
    State(state): State<AppState>,
    Path((topic_name, id)): Path<(String, String)>,
    body: Result<Json<ResourceFields>, JsonRejection>,
) -> Result<Json<Resource>, ApiError> {
    let Json(fields) = body?;
    let updated = resource::update(&state.db, &topic_name, &id, &fields)
        .await
        .map_err(ApiError::resource)?;
    Ok(Json(updated))
}

pub(super) async fn add_pin(
    State(state): State<AppState>,
    Path((topic_name, id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(pin::pin(&state.db, &topic_name, &id).await?))
}

pub(super) async fn remove_pin(
    State(state): State<AppState>,
    Path((topic_name, id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(pin::unpin(&state.db, &topic_name, &id).await?))
}

pub(super) async fn move_resource(
    State(state): State<AppState>,
    Path((from, to, id)): Path<(String, String, String)>,
    body: Result<Json<ResourceFields>, JsonRejection>,
) -> Result<Json<Resource>, ApiError> {
    let Json(fields) = body?;
    Ok(Json(
        mover::move_resource(&state.db, &from, &to, &id, &fields).await?,
    ))
}

pub(super) async fn rename_collection(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<RenamedNamespaceResponse>, ApiError> {
    let change = topic::rename_topic(&state.db, &from, &to).await?;
    Ok(Json(RenamedNamespaceResponse {
        updated_collection: change.name,
        namespaces: change.topics,
    }))
}

pub(super) async fn delete_resource(
    State(state): State<AppState>,
    Path((topic_name, id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    let deleted = resource::delete(&state.db, &topic_name, &id)
        .await
        .map_err(ApiError::resource)?;
    Ok(Json(deleted))
}

pub(super) async fn drop_collection(
    State(state): State<AppState>,
    Path(topic_name): Path<String>,
) -> Result<Json<DroppedResponse>, ApiError> {
    if topic::drop_topic(&state.db, &topic_name).await? {
        Ok(Json(DroppedResponse { dropped: true }))
    } else {
        Err(ApiError::TopicNotFound)
    }
}
