//! Task query engine: filter predicates piped into a stable sort.
//!
//! # Responsibility
//! - Narrow a task collection with an AND-combined filter specification.
//! - Order the result by one sort field and direction.
//!
//! # Invariants
//! - Queries are pure: inputs are borrowed and never mutated.
//! - Filter output preserves input order; sort is stable.

pub mod filter;
pub mod sort;

use crate::model::task::Task;
use filter::{filter_tasks, TaskFilter};
use sort::{sort_tasks, SortOption};

/// Filters then sorts `tasks`, returning borrowed matches.
pub fn query_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter, sort: SortOption) -> Vec<&'a Task> {
    sort_tasks(filter_tasks(tasks, filter), sort)
}
