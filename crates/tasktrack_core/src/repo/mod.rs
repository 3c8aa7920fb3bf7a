//! Repository store: the single writable owner of tasks, projects and tags.
//!
//! # Responsibility
//! - Expose add/update/delete mutations with cascading integrity fixups.
//! - Snapshot the full state through the persistence gateway after every
//!   in-memory mutation.
//!
//! # Invariants
//! - Every mutation validates, mutates, then persists, in that order.
//! - Unknown ids surface `StoreError::NotFound` instead of silently no-oping.

pub mod task_store;
