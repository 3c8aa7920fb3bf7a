//! Filter specification and predicate evaluation.
//!
//! # Invariants
//! - Every field is independently optional; an unset field imposes no
//!   constraint. Set fields are combined with logical AND.
//! - `tags` matches when the task shares at least one tag with the filter.
//! - A task without `due_date` fails any set date bound.

use crate::model::project::ProjectId;
use crate::model::tag::TagId;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive bounds on `due_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Timestamp>,
}

impl DateRange {
    fn admits(&self, due_date: Option<Timestamp>) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(due) = due_date else {
            return false;
        };
        self.from.map_or(true, |from| due >= from) && self.to.map_or(true, |to| due <= to)
    }
}

/// Task filter specification. `None` on a selector field means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<ProjectId>,
    pub tags: BTreeSet<TagId>,
    /// Case-insensitive substring over title or description.
    pub search: String,
    pub date_range: DateRange,
}

impl TaskFilter {
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Returns whether `task` satisfies every set predicate.
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self.priority.is_some_and(|priority| task.priority != priority) {
            return false;
        }
        if let Some(project_id) = self.project_id.as_deref() {
            if task.project_id.as_deref() != Some(project_id) {
                return false;
            }
        }
        if !self.tags.is_empty() && self.tags.is_disjoint(&task.tags) {
            return false;
        }
        if !self.search.is_empty() && !matches_search(task, &self.search.to_lowercase()) {
            return false;
        }
        self.date_range.admits(task.due_date)
    }

    /// Shallow-merges supplied fields into this filter.
    pub fn merge(&mut self, update: TaskFilterUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(project_id) = update.project_id {
            self.project_id = project_id;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
        if let Some(date_range) = update.date_range {
            self.date_range = date_range;
        }
    }
}

/// Partial filter change. For selector fields `Some(None)` resets to "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilterUpdate {
    pub status: Option<Option<TaskStatus>>,
    pub priority: Option<Option<Priority>>,
    pub project_id: Option<Option<ProjectId>>,
    pub tags: Option<BTreeSet<TagId>>,
    pub search: Option<String>,
    pub date_range: Option<DateRange>,
}

/// Returns matching tasks in input order.
pub fn filter_tasks<'a, I>(tasks: I, filter: &TaskFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|task| filter.matches(task)).collect()
}

fn matches_search(task: &Task, needle_lower: &str) -> bool {
    task.title.to_lowercase().contains(needle_lower)
        || task
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle_lower))
}

#[cfg(test)]
mod tests {
    use super::{filter_tasks, DateRange, TaskFilter, TaskFilterUpdate};
    use crate::model::task::{NewTask, Priority, Task, TaskStatus};

    fn task(id: &str, title: &str, due_date: Option<i64>) -> Task {
        let mut data = NewTask::new(title, Priority::Medium);
        data.due_date = due_date;
        Task::from_new(id.to_string(), data, 0)
    }

    #[test]
    fn default_filter_matches_everything() {
        let tasks = vec![task("a", "one", None), task("b", "two", Some(5))];
        let filter = TaskFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter_tasks(&tasks, &filter).len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut described = task("b", "groceries", None);
        described.description = Some("Buy MILK".to_string());
        let tasks = vec![task("a", "Milkshake recipe", None), described, task("c", "x", None)];
        let filter = TaskFilter {
            search: "milk".to_string(),
            ..TaskFilter::default()
        };

        let ids: Vec<&str> = filter_tasks(&tasks, &filter)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn date_bounds_are_inclusive_and_exclude_undated_tasks() {
        let tasks = vec![
            task("early", "e", Some(9)),
            task("from", "f", Some(10)),
            task("to", "t", Some(20)),
            task("late", "l", Some(21)),
            task("undated", "u", None),
        ];
        let filter = TaskFilter {
            date_range: DateRange {
                from: Some(10),
                to: Some(20),
            },
            ..TaskFilter::default()
        };

        let ids: Vec<&str> = filter_tasks(&tasks, &filter)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["from", "to"]);

        let only_to = TaskFilter {
            date_range: DateRange {
                from: None,
                to: Some(20),
            },
            ..TaskFilter::default()
        };
        assert!(!only_to.matches(&tasks[4]));
    }

    #[test]
    fn merge_only_touches_supplied_fields() {
        let mut filter = TaskFilter {
            search: "keep".to_string(),
            status: Some(TaskStatus::Pending),
            ..TaskFilter::default()
        };
        filter.merge(TaskFilterUpdate {
            priority: Some(Some(Priority::High)),
            status: Some(None),
            ..TaskFilterUpdate::default()
        });

        assert_eq!(filter.search, "keep");
        assert_eq!(filter.priority, Some(Priority::High));
        assert_eq!(filter.status, None);
    }
}
