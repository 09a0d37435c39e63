use super::collection_name;
use crate::codec::decode;
use crate::db::Db;
use crate::error::CoreError;
use tracing::info;

/// Outcome of a create or rename: the canonical (decoded) topic name and the
/// topic list after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicChange {
    pub name: String,
    pub topics: Vec<String>,
}

/// Every topic name, decoded, in store-defined order.
pub async fn list_topics(db: &Db) -> Result<Vec<String>, CoreError> {
    let names = db.store().list_collections().await?;
    Ok(names.iter().map(|name| decode(name)).collect())
}

/// Create an empty topic.
pub async fn create_topic(db: &Db, name: &str) -> Result<TopicChange, CoreError> {
    let collection = collection_name(db, name)?;
    db.store().create_collection(&collection).await?;
    let name = decode(&collection);
    info!(topic = %name, "Created topic");
    Ok(TopicChange {
        name,
        topics: list_topics(db).await?,
    })
}

/// Rename a topic in place; its resources and pin index move with it.
pub async fn rename_topic(db: &Db, from: &str, to: &str) -> Result<TopicChange, CoreError> {
    let source = collection_name(db, from)?;
    let target = collection_name(db, to)?;
    db.store().rename_collection(&source, &target).await?;
    let name = decode(&target);
    info!(from = %decode(&source), to = %name, "Renamed topic");
    Ok(TopicChange {
        name,
        topics: list_topics(db).await?,
    })
}

/// Drop a topic with all its resources and its pin index. `false` when the
/// topic did not exist.
pub async fn drop_topic(db: &Db, name: &str) -> Result<bool, CoreError> {
    let collection = collection_name(db, name)?;
    let dropped = db.store().drop_collection(&collection).await?;
    if dropped {
        info!(topic = %decode(&collection), "Dropped topic");
    }
    Ok(dropped)
}
