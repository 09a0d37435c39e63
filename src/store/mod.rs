//! The document store the core is handed.
//!
//! A store is a set of named collections holding schemaless JSON documents.
//! Each document carries a store-assigned `_id`. Every single-document write
//! is atomic; nothing spans two documents.
mod atomic;
mod error;
mod fs;

pub use error::StoreError;
pub use fs::{FsStore, MAX_COLLECTION_NAME_BYTES};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A stored document.
pub type Document = Map<String, Value>;

/// Field holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// Selects documents in a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match on the store-assigned identifier.
    Id(String),
    /// Match on a top-level field equal to a value.
    Eq { field: String, value: Value },
    /// Match when a top-level field is absent or holds a different value.
    Ne { field: String, value: Value },
    /// Match when every clause matches.
    And(Vec<Filter>),
}

impl Filter {
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Filter::Id(id.into())
    }

    #[must_use]
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn field_ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether `document` is selected by this filter.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::Id(id) => document.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str()),
            Filter::Eq { field, value } => document.get(field) == Some(value),
            Filter::Ne { field, value } => document.get(field) != Some(value),
            Filter::And(clauses) => clauses.iter().all(|clause| clause.matches(document)),
        }
    }

    /// The identifier this filter pins down, if any. Lets a store go
    /// straight to one document instead of scanning.
    #[must_use]
    pub fn id_hint(&self) -> Option<&str> {
        match self {
            Filter::Id(id) => Some(id),
            Filter::And(clauses) => clauses.iter().find_map(Filter::id_hint),
            Filter::Eq { .. } | Filter::Ne { .. } => None,
        }
    }

    /// Fields a newly upserted document starts with.
    #[must_use]
    pub fn seed(&self) -> Document {
        let mut document = Document::new();
        self.seed_into(&mut document);
        document
    }

    fn seed_into(&self, document: &mut Document) {
        match self {
            Filter::Id(id) => {
                document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            }
            Filter::Eq { field, value } => {
                document.insert(field.clone(), value.clone());
            }
            Filter::Ne { .. } => {}
            Filter::And(clauses) => {
                for clause in clauses {
                    clause.seed_into(document);
                }
            }
        }
    }
}

/// A single-document modification.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Overwrite the given top-level fields.
    Set(Document),
    /// Remove the given top-level fields.
    Unset(Vec<String>),
    /// Append `value` to the array `field` unless already present.
    AddToSet { field: String, value: Value },
    /// Remove every occurrence of `value` from the array `field`.
    Pull { field: String, value: Value },
}

impl Update {
    /// Apply the modification to `document` in place.
    pub fn apply(&self, document: &mut Document) {
        match self {
            Update::Set(fields) => {
                for (key, value) in fields {
                    if key != ID_FIELD {
                        document.insert(key.clone(), value.clone());
                    }
                }
            }
            Update::Unset(fields) => {
                for key in fields {
                    document.remove(key);
                }
            }
            Update::AddToSet { field, value } => {
                let slot = document
                    .entry(field.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot {
                    Value::Array(items) => {
                        if !items.contains(value) {
                            items.push(value.clone());
                        }
                    }
                    other => *other = Value::Array(vec![value.clone()]),
                }
            }
            Update::Pull { field, value } => {
                if let Some(Value::Array(items)) = document.get_mut(field) {
                    items.retain(|item| item != value);
                }
            }
        }
    }
}

/// Options for [`DocumentStore::find_one_and_update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Insert a document built from the filter when nothing matches.
    pub upsert: bool,
}

impl UpdateOptions {
    #[must_use]
    pub fn upsert() -> Self {
        Self { upsert: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort on a numeric top-level field. Documents missing the field go last;
/// ties keep the store's natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }

    /// Stable-sort `documents` in place.
    pub fn apply(&self, documents: &mut [Document]) {
        documents.sort_by(|a, b| {
            let left = a.get(&self.field).and_then(Value::as_f64);
            let right = b.get(&self.field).and_then(Value::as_f64);
            match (left, right) {
                (Some(l), Some(r)) => {
                    let ord = l.partial_cmp(&r).unwrap_or(Ordering::Equal);
                    match self.order {
                        SortOrder::Ascending => ord,
                        SortOrder::Descending => ord.reverse(),
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }
}

/// Namespaced document storage.
///
/// Writing into a collection that does not exist creates it, like the
/// document databases this trait is modelled on; reading from one yields
/// nothing.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Names of every collection, in store-defined order.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Create an empty collection. Fails if it already exists.
    async fn create_collection(&self, name: &str) -> Result<(), StoreError>;

    /// Rename a collection, keeping its documents.
    async fn rename_collection(&self, from: &str, to: &str) -> Result<(), StoreError>;

    /// Drop a collection and its documents. `false` if it did not exist.
    async fn drop_collection(&self, name: &str) -> Result<bool, StoreError>;

    /// Every document in a collection, optionally sorted.
    async fn find(&self, collection: &str, sort: Option<&Sort>) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError>;

    /// Insert a document, assigning `_id`. Returns the stored document.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Document, StoreError>;

    /// Atomically modify the first matching document and return it as it is
    /// after the update. `None` if nothing matched and `upsert` was off.
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
        options: UpdateOptions,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove the first matching document and return it.
    async fn find_one_and_delete(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
