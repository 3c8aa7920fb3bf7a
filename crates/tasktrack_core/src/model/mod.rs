//! Task/project/tag domain model.
//!
//! # Responsibility
//! - Define the canonical records owned by the repository store.
//! - Define add/update descriptors with explicit "present -> replace,
//!   absent -> unchanged" semantics.
//!
//! # Invariants
//! - Entity ids are opaque strings, immutable after creation.
//! - `created_at` is assigned once by the store and never mutated.
//! - A task is `Completed` iff `completed_at` is set.

pub mod project;
pub mod tag;
pub mod task;
pub mod validation;

/// Unix epoch milliseconds.
pub type Timestamp = i64;
