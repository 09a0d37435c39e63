// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod codec;
pub mod config;
pub mod cors;
pub mod db;
pub mod error;
pub mod logging;
pub mod mover;
pub mod pin;
pub mod request_logging;
pub mod resource;
pub mod sanitize;
pub mod server;
pub mod store;
pub mod topic;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use db::Db;
pub use error::CoreError;
pub use mover::move_resource;
pub use pin::{pin, pinned_ids, pull, reconcile_pins, unpin, MetaDocument};
pub use resource::{NewResource, Resource, ResourceFields};
pub use sanitize::{MarkupStripper, Sanitizer};
pub use store::{DocumentStore, FsStore, StoreError};
pub use topic::{create_topic, drop_topic, list_topics, rename_topic, TopicChange};
