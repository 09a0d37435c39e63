use crate::codec::{decode_all, encode};
use crate::db::Db;
use crate::error::CoreError;
use crate::resource::{resources_only, IS_PINNED_FIELD};
use crate::store::{Document, Filter, StoreError, Update, UpdateOptions, ID_FIELD};
use crate::topic::collection_name;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Marker field identifying the meta document.
pub const META_FIELD: &str = "meta";
/// Array of escaped resource ids in the meta document.
pub const PINS_FIELD: &str = "pins";

/// The per-topic pin index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaDocument {
    #[serde(default)]
    pub pins: Vec<String>,
}

impl MetaDocument {
    fn from_document(document: Document) -> Result<Self, CoreError> {
        serde_json::from_value(Value::Object(document))
            .map_err(|e| CoreError::Store(StoreError::JsonError(e)))
    }
}

fn meta_filter() -> Filter {
    Filter::field_eq(META_FIELD, true)
}

/// Add an escaped id to a collection's pin index, creating the meta document
/// on first use. Adding an id twice keeps one copy.
pub(crate) async fn push_pin(db: &Db, collection: &str, key: &str) -> Result<(), CoreError> {
    db.store()
        .find_one_and_update(
            collection,
            &meta_filter(),
            &Update::AddToSet {
                field: PINS_FIELD.to_string(),
                value: Value::String(key.to_string()),
            },
            UpdateOptions::upsert(),
        )
        .await?;
    Ok(())
}

/// Remove an escaped id from a collection's pin index. A missing meta
/// document or a missing id is not an error.
pub(crate) async fn pull_pin(db: &Db, collection: &str, key: &str) -> Result<(), CoreError> {
    db.store()
        .find_one_and_update(
            collection,
            &meta_filter(),
            &Update::Pull {
                field: PINS_FIELD.to_string(),
                value: Value::String(key.to_string()),
            },
            UpdateOptions::default(),
        )
        .await?;
    Ok(())
}

/// The decoded ids in a topic's pin index. Empty when the topic has never
/// had a pin.
pub async fn pinned_ids(db: &Db, topic: &str) -> Result<Vec<String>, CoreError> {
    let collection = collection_name(db, topic)?;
    let meta = match db.store().find_one(&collection, &meta_filter()).await? {
        Some(document) => MetaDocument::from_document(document)?,
        None => MetaDocument::default(),
    };
    Ok(decode_all(&meta.pins))
}

/// Rebuild a topic's pin index from the `isPinned` flags of its resources
/// and return the decoded ids. Repairs drift left by an interrupted pin,
/// unpin, delete or move.
pub async fn reconcile_pins(db: &Db, topic: &str) -> Result<Vec<String>, CoreError> {
    let collection = collection_name(db, topic)?;
    let exists = db
        .store()
        .list_collections()
        .await?
        .iter()
        .any(|name| *name == collection);
    if !exists {
        return Err(CoreError::not_found(format!("topic {topic}")));
    }

    let keep = resources_only();
    let pinned: Vec<String> = db
        .store()
        .find(&collection, None)
        .await?
        .iter()
        .filter(|document| keep.matches(document))
        .filter(|document| document.get(IS_PINNED_FIELD) == Some(&Value::Bool(true)))
        .filter_map(|document| document.get(ID_FIELD).and_then(Value::as_str))
        .map(encode)
        .collect();

    let mut before = pinned_ids(db, topic).await?;
    let mut fields = Document::new();
    fields.insert(
        PINS_FIELD.to_string(),
        Value::Array(pinned.iter().cloned().map(Value::String).collect()),
    );
    db.store()
        .find_one_and_update(&collection, &meta_filter(), &Update::Set(fields), UpdateOptions::upsert())
        .await?;

    let after = decode_all(&pinned);
    let mut sorted_after = after.clone();
    sorted_after.sort();
    before.sort();
    if before == sorted_after {
        info!(topic = %topic, pins = after.len(), "Pin index already consistent");
    } else {
        warn!(topic = %topic, before = ?before, after = ?after, "Repaired drifted pin index");
    }
    Ok(after)
}
