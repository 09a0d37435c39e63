//! Cross-topic move of a single resource.
//!
//! The store has no multi-collection move, so a move is delete, pull, insert,
//! push, each a separate single-document write. If a later step fails the
//! earlier ones stay applied; the resource may be gone from the source topic
//! without having reached the target.
use crate::codec::encode;
use crate::db::Db;
use crate::error::CoreError;
use crate::pin::{pull_pin, push_pin};
use crate::resource::{self, resource_filter, validate_fields, Resource, ResourceFields};
use crate::resource::{CREATED_AT_FIELD, IS_PINNED_FIELD};
use crate::topic::{collection_name, resource_key};
use serde_json::Value;
use tracing::info;

/// Move resource `id` from `from` to `to`, replacing its description,
/// keywords and link with `fields`.
///
/// Moving within one topic is an in-place [`resource::update`]. Across
/// topics the resource gets a new id in the target topic; its creation time
/// and pin state carry over, and the pin indexes of both topics follow.
pub async fn move_resource(
    db: &Db,
    from: &str,
    to: &str,
    id: &str,
    fields: &ResourceFields,
) -> Result<Resource, CoreError> {
    let source = collection_name(db, from)?;
    let target = collection_name(db, to)?;
    let key = resource_key(id)?;
    let clean = validate_fields(db, fields)?;

    if source == target {
        return resource::update(db, from, id, fields).await;
    }

    let deleted = db
        .store()
        .find_one_and_delete(&source, &resource_filter(&key))
        .await?
        .ok_or_else(|| CoreError::not_found(format!("resource {id}")))?;
    let was_pinned = deleted.get(IS_PINNED_FIELD) == Some(&Value::Bool(true));
    if was_pinned {
        pull_pin(db, &source, &key).await?;
    }

    let mut document = clean.to_document();
    if let Some(created_at) = deleted.get(CREATED_AT_FIELD) {
        document.insert(CREATED_AT_FIELD.to_string(), created_at.clone());
    }
    if was_pinned {
        document.insert(IS_PINNED_FIELD.to_string(), Value::Bool(true));
    }
    let inserted = Resource::from_document(db.store().insert_one(&target, document).await?)?;
    if was_pinned {
        push_pin(db, &target, &encode(&inserted.id)).await?;
    }

    info!(from = %from, to = %to, old_id = %id, new_id = %inserted.id, pinned = was_pinned, "Moved resource");
    Ok(inserted)
}

#[cfg(test)]
#[path = "mover_tests.rs"]
mod tests;
