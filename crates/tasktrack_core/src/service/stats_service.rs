//! Dashboard statistics over a task collection.
//!
//! # Invariants
//! - All functions are pure and borrow their input.
//! - Day boundaries are computed in UTC.

use crate::clock::start_of_day_utc;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::Timestamp;
use crate::query::sort::{sort_tasks, SortDirection, SortField, SortOption};

/// Number of upcoming tasks shown by default.
pub const UPCOMING_DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// High-priority tasks that are not completed yet.
    pub open_high_priority: usize,
}

impl TaskStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            match task.priority {
                Priority::High => stats.high += 1,
                Priority::Medium => stats.medium += 1,
                Priority::Low => stats.low += 1,
            }
            if task.priority == Priority::High && !task.is_completed() {
                stats.open_high_priority += 1;
            }
        }
        stats
    }

    /// Completed share as a rounded percentage; `0` for an empty collection.
    pub fn completion_rate(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let rate = (self.completed as f64 / self.total as f64 * 100.0).round();
        rate as u8
    }
}

/// Open tasks due today or later, soonest first, capped at `limit`.
pub fn upcoming_tasks(tasks: &[Task], now: Timestamp, limit: usize) -> Vec<&Task> {
    let today = start_of_day_utc(now);
    let open_and_due = tasks.iter().filter(|task| {
        !task.is_completed() && task.due_date.is_some_and(|due| due >= today)
    });
    let mut upcoming = sort_tasks(
        open_and_due,
        SortOption::new(SortField::DueDate, SortDirection::Asc),
    );
    upcoming.truncate(limit);
    upcoming
}

/// Number of tasks assigned to `project_id`.
pub fn project_task_count(tasks: &[Task], project_id: &str) -> usize {
    tasks
        .iter()
        .filter(|task| task.project_id.as_deref() == Some(project_id))
        .count()
}
