//! Pin index maintenance.
//!
//! Each topic holds one meta document, marked `meta: true`, whose `pins`
//! array mirrors the ids of the topic's pinned resources. The resource flag
//! and the meta document are two separate single-document writes; nothing
//! makes the pair atomic. A concurrent reader can see them disagree between
//! the two steps, and a failure after the first step leaves the index
//! drifted until [`reconcile_pins`] runs.
mod index;
mod ops;

pub use index::{pinned_ids, reconcile_pins, MetaDocument, META_FIELD, PINS_FIELD};
pub(crate) use index::{pull_pin, push_pin};
pub use ops::{pin, pull, unpin};

#[cfg(test)]
#[path = "pin_tests.rs"]
mod tests;
