//! Core domain logic for TaskTrack.
//! This crate is the single source of truth for task/project/tag invariants.

pub mod clock;
pub mod db;
pub mod ids;
pub mod logging;
pub mod model;
pub mod persist;
pub mod query;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{NewProject, Project, ProjectId, ProjectUpdate};
pub use model::tag::{NewTag, Tag, TagId, TagUpdate};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskStatus, TaskUpdate};
pub use model::validation::ValidationError;
pub use model::Timestamp;
pub use persist::{
    BlobStore, ExportDocument, ImportError, ImportSummary, MemoryBlobStore, PersistError,
    PersistResult, PersistenceGateway, SqliteBlobStore, StoreState,
};
pub use query::filter::{filter_tasks, DateRange, TaskFilter, TaskFilterUpdate};
pub use query::query_tasks;
pub use query::sort::{sort_tasks, SortDirection, SortField, SortOption};
pub use repo::task_store::{EntityKind, StoreError, StoreResult, TaskStore, TaskView};
pub use service::stats_service::{project_task_count, upcoming_tasks, TaskStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
