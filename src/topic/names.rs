use crate::codec::{encode, starts_with_sentinel, RESERVED_SENTINEL};
use crate::db::Db;
use crate::error::CoreError;

/// Turn a user-facing topic name into the collection name stored in the
/// document store.
///
/// Rejects names that start with the store's operator sentinel (before and
/// after sanitizing) and names that sanitize to nothing.
pub fn collection_name(db: &Db, topic: &str) -> Result<String, CoreError> {
    if starts_with_sentinel(topic) {
        return Err(CoreError::validation(format!(
            "topic name may not start with '{RESERVED_SENTINEL}'"
        )));
    }
    let clean = db.sanitize(topic);
    if clean.is_empty() {
        return Err(CoreError::validation("topic name is empty"));
    }
    if starts_with_sentinel(&clean) {
        return Err(CoreError::validation(format!(
            "topic name may not start with '{RESERVED_SENTINEL}'"
        )));
    }
    Ok(encode(&clean))
}

/// Escape a resource id taken from a request for use in a lookup.
pub fn resource_key(id: &str) -> Result<String, CoreError> {
    if starts_with_sentinel(id) {
        return Err(CoreError::validation(format!(
            "resource id may not start with '{RESERVED_SENTINEL}'"
        )));
    }
    if id.is_empty() {
        return Err(CoreError::validation("resource id is empty"));
    }
    Ok(encode(id))
}
