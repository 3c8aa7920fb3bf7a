use std::collections::BTreeSet;
use tasktrack_core::{
    filter_tasks, query_tasks, sort_tasks, DateRange, ManualClock, MemoryBlobStore, NewTask,
    PersistenceGateway, Priority, SequentialIdGenerator, SortDirection, SortField, SortOption,
    Task, TaskFilter, TaskFilterUpdate, TaskStatus, TaskStore,
};

// 2025-06-01T00:00:00Z
const JUNE_1: i64 = 1_748_736_000_000;
const DAY: i64 = 86_400_000;

fn task(id: &str, title: &str) -> Task {
    Task::from_new(id.to_string(), NewTask::new(title, Priority::Medium), 0)
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.clone()).collect()
}

fn fixture() -> Vec<Task> {
    let mut x = task("x", "Quarterly report");
    x.priority = Priority::High;
    x.tags = BTreeSet::from(["t1".to_string(), "t2".to_string()]);
    x.due_date = Some(JUNE_1);

    let mut high_untagged = task("high-untagged", "Call plumber");
    high_untagged.priority = Priority::High;
    high_untagged.tags = BTreeSet::from(["t3".to_string()]);

    let mut low_tagged = task("low-tagged", "water plants");
    low_tagged.priority = Priority::Low;
    low_tagged.tags = BTreeSet::from(["t1".to_string()]);
    low_tagged.due_date = Some(JUNE_1 + DAY);

    let mut done = task("done", "File taxes");
    done.status = TaskStatus::Completed;
    done.completed_at = Some(10);
    done.project_id = Some("p1".to_string());
    done.description = Some("Report receipts".to_string());

    vec![x, high_untagged, low_tagged, done]
}

#[test]
fn undated_tasks_trail_in_both_directions() {
    let mut a = task("A", "A");
    a.due_date = None;
    let mut b = task("B", "B");
    b.due_date = Some(JUNE_1);
    let tasks = vec![a, b];

    let asc = sort_tasks(&tasks, SortOption::new(SortField::DueDate, SortDirection::Asc));
    assert_eq!(ids(&asc), vec!["B", "A"]);
    let desc = sort_tasks(&tasks, SortOption::new(SortField::DueDate, SortDirection::Desc));
    assert_eq!(ids(&desc), vec!["B", "A"]);
}

#[test]
fn due_date_desc_mirrors_dated_tasks_only() {
    let mut early = task("early", "e");
    early.due_date = Some(JUNE_1);
    let undated = task("undated", "u");
    let mut late = task("late", "l");
    late.due_date = Some(JUNE_1 + DAY);
    let tasks = vec![early, undated, late];

    let desc = sort_tasks(&tasks, SortOption::new(SortField::DueDate, SortDirection::Desc));
    assert_eq!(ids(&desc), vec!["late", "early", "undated"]);
}

#[test]
fn priority_and_tag_filter_selects_exact_match() {
    let tasks = fixture();
    let filter = TaskFilter {
        priority: Some(Priority::High),
        tags: BTreeSet::from(["t1".to_string()]),
        ..TaskFilter::default()
    };

    assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec!["x"]);
}

#[test]
fn tag_filter_is_or_within_the_set() {
    let tasks = fixture();
    let filter = TaskFilter {
        tags: BTreeSet::from(["t2".to_string(), "t3".to_string()]),
        ..TaskFilter::default()
    };

    assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec!["x", "high-untagged"]);
}

#[test]
fn status_project_and_search_filters_combine_with_and() {
    let tasks = fixture();
    let by_status = TaskFilter {
        status: Some(TaskStatus::Completed),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &by_status)), vec!["done"]);

    let by_project = TaskFilter {
        project_id: Some("p1".to_string()),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &by_project)), vec!["done"]);

    let search = TaskFilter {
        search: "REPORT".to_string(),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &search)), vec!["x", "done"]);

    let search_and_status = TaskFilter {
        search: "report".to_string(),
        status: Some(TaskStatus::Pending),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &search_and_status)), vec!["x"]);
}

#[test]
fn filter_output_is_ordered_subset_and_idempotent() {
    let tasks = fixture();
    let filters = [
        TaskFilter::default(),
        TaskFilter {
            tags: BTreeSet::from(["t1".to_string()]),
            ..TaskFilter::default()
        },
        TaskFilter {
            date_range: DateRange {
                from: Some(JUNE_1),
                to: None,
            },
            ..TaskFilter::default()
        },
        TaskFilter {
            search: "e".to_string(),
            ..TaskFilter::default()
        },
    ];

    for filter in &filters {
        let once = filter_tasks(&tasks, filter);
        let positions: Vec<usize> = once
            .iter()
            .map(|hit| tasks.iter().position(|task| task.id == hit.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let twice = filter_tasks(once.iter().copied(), filter);
        assert_eq!(ids(&once), ids(&twice));
    }
}

#[test]
fn filtering_does_not_mutate_input() {
    let tasks = fixture();
    let before = tasks.clone();
    let filter = TaskFilter {
        search: "report".to_string(),
        ..TaskFilter::default()
    };
    let _ = query_tasks(&tasks, &filter, SortOption::new(SortField::Title, SortDirection::Desc));
    assert_eq!(tasks, before);
}

#[test]
fn sort_is_stable_for_equal_keys_in_both_directions() {
    let mut tasks = Vec::new();
    for (id, priority) in [
        ("m1", Priority::Medium),
        ("h1", Priority::High),
        ("m2", Priority::Medium),
        ("h2", Priority::High),
        ("m3", Priority::Medium),
    ] {
        let mut task = task(id, id);
        task.priority = priority;
        tasks.push(task);
    }

    let asc = sort_tasks(&tasks, SortOption::new(SortField::Priority, SortDirection::Asc));
    assert_eq!(ids(&asc), vec!["m1", "m2", "m3", "h1", "h2"]);
    let desc = sort_tasks(&tasks, SortOption::new(SortField::Priority, SortDirection::Desc));
    assert_eq!(ids(&desc), vec!["h1", "h2", "m1", "m2", "m3"]);

    let undated = vec![task("u1", "u1"), task("u2", "u2"), task("u3", "u3")];
    let by_due = sort_tasks(&undated, SortOption::new(SortField::DueDate, SortDirection::Desc));
    assert_eq!(ids(&by_due), vec!["u1", "u2", "u3"]);
}

#[test]
fn store_query_uses_stored_filters_and_sort() {
    let mut store = TaskStore::init(
        PersistenceGateway::new(MemoryBlobStore::new()),
        SequentialIdGenerator::new("task"),
        ManualClock::new(0),
    )
    .unwrap();
    let low = store
        .add_task(NewTask::new("low", Priority::Low).with_due_date(JUNE_1))
        .unwrap();
    let high = store
        .add_task(NewTask::new("high", Priority::High).with_due_date(JUNE_1 + DAY))
        .unwrap();
    let undated = store.add_task(NewTask::new("undated", Priority::High)).unwrap();

    assert_eq!(ids(&store.filtered_tasks()), vec![low.clone(), high.clone(), undated.clone()]);

    store
        .set_filters(TaskFilterUpdate {
            priority: Some(Some(Priority::High)),
            ..TaskFilterUpdate::default()
        })
        .unwrap();
    store
        .set_sort_option(SortOption::new(SortField::Title, SortDirection::Asc))
        .unwrap();
    assert_eq!(ids(&store.filtered_tasks()), vec![high.clone(), undated.clone()]);

    store.reset_filters().unwrap();
    assert_eq!(store.filters(), &TaskFilter::default());
    assert_eq!(store.filtered_tasks().len(), 3);
}
