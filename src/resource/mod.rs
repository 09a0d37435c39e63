//! Resource repository: CRUD of bookmarked links within one topic.
mod crud;
mod types;
mod validate;

pub use crud::{create, delete, list, update};
pub use types::{NewResource, Resource, ResourceFields, CREATED_AT_FIELD, IS_PINNED_FIELD};
pub(crate) use types::{resource_filter, resources_only};
pub(crate) use validate::validate_fields;

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
