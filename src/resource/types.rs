use crate::codec::{decode, decode_all};
use crate::error::CoreError;
use crate::pin::META_FIELD;
use crate::store::{Document, Filter};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub const CREATED_AT_FIELD: &str = "createdAt";
pub const IS_PINNED_FIELD: &str = "isPinned";

/// One bookmarked link, as returned to callers (all text decoded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub link: String,
    pub created_at: Number,
    /// Present (and `true`) only while pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl Resource {
    /// Decode a stored resource document.
    pub(crate) fn from_document(document: Document) -> Result<Self, CoreError> {
        let stored: Resource = serde_json::from_value(Value::Object(document))
            .map_err(|e| CoreError::Store(e.into()))?;
        Ok(Resource {
            id: decode(&stored.id),
            description: decode(&stored.description),
            keywords: decode_all(&stored.keywords),
            link: stored.link,
            created_at: stored.created_at,
            is_pinned: stored.is_pinned.filter(|pinned| *pinned),
        })
    }

    #[must_use]
    pub fn pinned(&self) -> bool {
        self.is_pinned == Some(true)
    }
}

/// The mutable fields of a resource as sent by a client. Every field is
/// required; missing ones fail validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceFields {
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub link: Option<String>,
}

/// A resource to create: the mutable fields plus its creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    #[serde(flatten)]
    pub fields: ResourceFields,
    pub created_at: Option<Number>,
}

/// Selects the resource `key` and never the topic's meta document.
pub(crate) fn resource_filter(key: &str) -> Filter {
    Filter::And(vec![Filter::id(key), Filter::field_ne(META_FIELD, true)])
}

/// Whether a listed document is a resource rather than the meta document.
pub(crate) fn resources_only() -> Filter {
    Filter::field_ne(META_FIELD, true)
}
