//! Topic registry: named, dynamically created collections of resources.
//!
//! Topic names come from users, so every name is sanitized and escaped
//! before it is used as a collection name, and decoded on the way out.
mod names;
mod registry;

pub use names::{collection_name, resource_key};
pub use registry::{create_topic, drop_topic, list_topics, rename_topic, TopicChange};

#[cfg(test)]
#[path = "topic_tests.rs"]
mod tests;
