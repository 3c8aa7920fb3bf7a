//! Sort specification and task comparators.
//!
//! # Invariants
//! - Sorting is stable: equal keys keep input order in both directions.
//! - Tasks without `due_date` always trail dated tasks, even for `Desc`.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    DueDate,
    Priority,
    CreatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Sort field plus direction. Defaults to `dueDate asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for SortOption {
    fn default() -> Self {
        Self::new(SortField::DueDate, SortDirection::Asc)
    }
}

/// Returns a new, stably sorted sequence.
pub fn sort_tasks<'a, I>(tasks: I, option: SortOption) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    sorted.sort_by(|a, b| compare_tasks(a, b, option));
    sorted
}

/// Total order over tasks for one sort option.
pub fn compare_tasks(a: &Task, b: &Task, option: SortOption) -> Ordering {
    let direction = option.direction;
    match option.field {
        SortField::DueDate => match (a.due_date, b.due_date) {
            (Some(left), Some(right)) => direction.orient(left.cmp(&right)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::Priority => direction.orient(a.priority.weight().cmp(&b.priority.weight())),
        SortField::CreatedAt => direction.orient(a.created_at.cmp(&b.created_at)),
        SortField::Title => direction.orient(collate(&a.title, &b.title)),
    }
}

/// Locale-style comparison without ICU data: case-insensitive first,
/// then lowercase before uppercase at the first differing letter.
pub fn collate(left: &str, right: &str) -> Ordering {
    let folded = left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        left.chars()
            .zip(right.chars())
            .map(|(l, r)| l.is_uppercase().cmp(&r.is_uppercase()))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}
