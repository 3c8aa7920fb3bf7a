use tasktrack_core::{
    project_task_count, upcoming_tasks, NewTask, Priority, Task, TaskStats, TaskStatus,
};

// 2025-06-01T00:00:00Z
const JUNE_1: i64 = 1_748_736_000_000;
const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;

fn task(id: &str, priority: Priority, status: TaskStatus, due_date: Option<i64>) -> Task {
    let mut task = Task::from_new(id.to_string(), NewTask::new(id, priority), 0);
    task.due_date = due_date;
    if status == TaskStatus::Completed {
        task.complete(1);
    } else {
        task.set_status(status, 1);
    }
    task
}

#[test]
fn stats_count_statuses_priorities_and_open_high_priority() {
    let tasks = vec![
        task("a", Priority::High, TaskStatus::Pending, None),
        task("b", Priority::High, TaskStatus::Completed, None),
        task("c", Priority::Medium, TaskStatus::InProgress, None),
        task("d", Priority::Low, TaskStatus::Completed, None),
    ];

    let stats = TaskStats::from_tasks(&tasks);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.high, 2);
    assert_eq!(stats.medium, 1);
    assert_eq!(stats.low, 1);
    assert_eq!(stats.open_high_priority, 1);
    assert_eq!(stats.completion_rate(), 50);
}

#[test]
fn upcoming_includes_earlier_today_and_excludes_completed_or_past() {
    let now = JUNE_1 + 15 * HOUR;
    let tasks = vec![
        task("later", Priority::Low, TaskStatus::Pending, Some(JUNE_1 + 3 * DAY)),
        task("this-morning", Priority::Low, TaskStatus::Pending, Some(JUNE_1 + 8 * HOUR)),
        task("yesterday", Priority::Low, TaskStatus::Pending, Some(JUNE_1 - HOUR)),
        task("done", Priority::Low, TaskStatus::Completed, Some(JUNE_1 + DAY)),
        task("undated", Priority::Low, TaskStatus::InProgress, None),
        task("tomorrow", Priority::Low, TaskStatus::InProgress, Some(JUNE_1 + DAY)),
    ];

    let upcoming: Vec<&str> = upcoming_tasks(&tasks, now, 5)
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(upcoming, vec!["this-morning", "tomorrow", "later"]);

    assert_eq!(upcoming_tasks(&tasks, now, 1).len(), 1);
}

#[test]
fn project_task_count_matches_exact_project() {
    let mut tasks = vec![
        task("a", Priority::Low, TaskStatus::Pending, None),
        task("b", Priority::Low, TaskStatus::Pending, None),
        task("c", Priority::Low, TaskStatus::Pending, None),
    ];
    tasks[0].project_id = Some("p1".to_string());
    tasks[1].project_id = Some("p1".to_string());
    tasks[2].project_id = Some("p2".to_string());

    assert_eq!(project_task_count(&tasks, "p1"), 2);
    assert_eq!(project_task_count(&tasks, "p3"), 0);
}
