//! Handle passed to every core operation.
use crate::sanitize::{MarkupStripper, Sanitizer};
use crate::store::DocumentStore;
use std::sync::Arc;

/// The store connection plus the text sanitizer. Cloning is cheap; the core
/// keeps no other state.
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn DocumentStore>,
    sanitizer: Arc<dyn Sanitizer>,
}

impl Db {
    pub fn new(store: Arc<dyn DocumentStore>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self { store, sanitizer }
    }

    /// Use the default [`MarkupStripper`].
    pub fn with_default_sanitizer(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, Arc::new(MarkupStripper))
    }

    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn sanitize(&self, text: &str) -> String {
        self.sanitizer.sanitize(text)
    }
}
