//! File-backed [`DocumentStore`].
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<hex(collection name)>/<_id>.json
//! ```
//!
//! Collection names are hex-encoded on disk so any name the core produces
//! is a valid directory name. Each document is one JSON file replaced
//! atomically on write.
use super::atomic::atomic_write;
use super::{Document, DocumentStore, Filter, Sort, StoreError, Update, UpdateOptions, ID_FIELD};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

const DOCUMENT_EXTENSION: &str = "json";

/// Longest collection name, in bytes, whose hex directory name still fits
/// the usual 255-byte file name limit.
pub const MAX_COLLECTION_NAME_BYTES: usize = 127;

/// Document store keeping one directory per collection.
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
    /// Held for writing by collection-level operations (create, rename,
    /// drop) and for reading by everything else.
    namespace_lock: RwLock<()>,
    /// Serializes read-modify-write cycles within one collection.
    collection_locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FsStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        debug!("Opened document store at {}", root.display());
        Ok(Self {
            root,
            namespace_lock: RwLock::new(()),
            collection_locks: StdMutex::new(HashMap::new()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() || name.len() > MAX_COLLECTION_NAME_BYTES {
            return Err(StoreError::InvalidCollectionName(name.to_string()));
        }
        Ok(self.root.join(hex::encode(name.as_bytes())))
    }

    fn collection_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .collection_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(name.to_string()).or_default())
    }

    /// Forget the lock of a collection that no longer exists under `name`.
    /// Callers hold the namespace write lock, so no one else holds it.
    fn forget_collection_lock(&self, name: &str) {
        self.collection_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}

/// Store ids are simple-format UUIDs; anything else cannot name a document.
fn is_valid_id(id: &str) -> bool {
    id.len() == 32 && id.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn document_path(dir: &Path, id: &str) -> Option<PathBuf> {
    is_valid_id(id).then(|| dir.join(format!("{id}.{DOCUMENT_EXTENSION}")))
}

fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

/// Read one document. A file deleted concurrently reads as absent.
async fn read_document(path: &Path) -> Result<Option<Document>, StoreError> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_slice::<Value>(&content)? {
        Value::Object(document) => Ok(Some(document)),
        _ => Err(StoreError::CorruptDocument(path.to_path_buf())),
    }
}

/// Every document of a collection directory, ordered by file name.
async fn read_documents(dir: &Path) -> Result<Vec<(PathBuf, Document)>, StoreError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(document) = read_document(&path).await? {
            documents.push((path, document));
        }
    }
    Ok(documents)
}

async fn locate(dir: &Path, filter: &Filter) -> Result<Option<(PathBuf, Document)>, StoreError> {
    if let Some(id) = filter.id_hint() {
        let Some(path) = document_path(dir, id) else {
            return Ok(None);
        };
        let found = read_document(&path).await?.filter(|document| filter.matches(document));
        return Ok(found.map(|document| (path, document)));
    }
    Ok(read_documents(dir)
        .await?
        .into_iter()
        .find(|(_, document)| filter.matches(document)))
}

async fn write_document(dir: &Path, document: &Document) -> Result<(), StoreError> {
    let path = document_id(document)
        .and_then(|id| document_path(dir, id))
        .ok_or_else(|| StoreError::CorruptDocument(dir.to_path_buf()))?;
    let content = serde_json::to_vec_pretty(document)?;
    atomic_write(&path, content).await?;
    Ok(())
}

/// Seed for an upsert: the filter's equalities become fields, and a fresh id
/// is assigned unless the filter named a usable one.
fn upsert_seed(filter: &Filter) -> Document {
    let mut document = filter.seed();
    let has_valid_id = document_id(&document).is_some_and(is_valid_id);
    if !has_valid_id {
        document.insert(ID_FIELD.to_string(), Value::String(new_id()));
    }
    document
}

#[async_trait]
impl DocumentStore for FsStore {
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let _namespace = self.namespace_lock.read().await;
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let decoded = file_name
                .to_str()
                .and_then(|hex_name| hex::decode(hex_name).ok())
                .and_then(|bytes| String::from_utf8(bytes).ok());
            if let Some(name) = decoded {
                names.push(name);
            }
        }
        Ok(names)
    }

    async fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        let _namespace = self.namespace_lock.write().await;
        let dir = self.collection_dir(name)?;
        if fs::try_exists(&dir).await? {
            return Err(StoreError::CollectionExists(name.to_string()));
        }
        fs::create_dir(&dir).await?;
        debug!("Created collection {name:?}");
        Ok(())
    }

    async fn rename_collection(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let _namespace = self.namespace_lock.write().await;
        let source = self.collection_dir(from)?;
        let target = self.collection_dir(to)?;
        if !fs::try_exists(&source).await? {
            return Err(StoreError::CollectionNotFound(from.to_string()));
        }
        if fs::try_exists(&target).await? {
            return Err(StoreError::CollectionExists(to.to_string()));
        }
        fs::rename(&source, &target).await?;
        self.forget_collection_lock(from);
        debug!("Renamed collection {from:?} to {to:?}");
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<bool, StoreError> {
        let _namespace = self.namespace_lock.write().await;
        let dir = self.collection_dir(name)?;
        if !fs::try_exists(&dir).await? {
            return Ok(false);
        }
        fs::remove_dir_all(&dir).await?;
        self.forget_collection_lock(name);
        debug!("Dropped collection {name:?}");
        Ok(true)
    }

    async fn find(&self, collection: &str, sort: Option<&Sort>) -> Result<Vec<Document>, StoreError> {
        let _namespace = self.namespace_lock.read().await;
        let dir = self.collection_dir(collection)?;
        let mut documents: Vec<Document> = read_documents(&dir)
            .await?
            .into_iter()
            .map(|(_, document)| document)
            .collect();
        if let Some(sort) = sort {
            sort.apply(&mut documents);
        }
        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let _namespace = self.namespace_lock.read().await;
        let dir = self.collection_dir(collection)?;
        Ok(locate(&dir, filter).await?.map(|(_, document)| document))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<Document, StoreError> {
        let _namespace = self.namespace_lock.read().await;
        let dir = self.collection_dir(collection)?;
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().await;
        fs::create_dir_all(&dir).await?;
        document.insert(ID_FIELD.to_string(), Value::String(new_id()));
        write_document(&dir, &document).await?;
        Ok(document)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
        options: UpdateOptions,
    ) -> Result<Option<Document>, StoreError> {
        let _namespace = self.namespace_lock.read().await;
        let dir = self.collection_dir(collection)?;
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().await;
        let mut document = match locate(&dir, filter).await? {
            Some((_, document)) => document,
            None if options.upsert => {
                fs::create_dir_all(&dir).await?;
                upsert_seed(filter)
            }
            None => return Ok(None),
        };
        update.apply(&mut document);
        write_document(&dir, &document).await?;
        Ok(Some(document))
    }

    async fn find_one_and_delete(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let _namespace = self.namespace_lock.read().await;
        let dir = self.collection_dir(collection)?;
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().await;
        let Some((path, document)) = locate(&dir, filter).await? else {
            return Ok(None);
        };
        fs::remove_file(&path).await?;
        Ok(Some(document))
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
