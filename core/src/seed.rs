use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{Task, TaskId, TaskStatus};

/// Tasks shown on a first run, or after a reset.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        seed(
            "1",
            "Complete React assignment",
            "Build a personal task manager using React, TypeScript, and React Router",
            TaskStatus::Pending,
            at(2024, 1, 15, 10, 0),
            at(2024, 1, 15, 10, 0),
        ),
        seed(
            "2",
            "Review code with peers",
            "Set up PR reviews with other interns and review their code",
            TaskStatus::Pending,
            at(2024, 1, 16, 9, 30),
            at(2024, 1, 16, 9, 30),
        ),
        seed(
            "3",
            "Set up GitHub repository",
            "Create public repo with proper branching strategy and issue tracking",
            TaskStatus::Completed,
            at(2024, 1, 14, 14, 20),
            at(2024, 1, 15, 8, 45),
        ),
        seed(
            "4",
            "Write project documentation",
            "Create comprehensive README with setup instructions and project overview",
            TaskStatus::Pending,
            at(2024, 1, 17, 11, 15),
            at(2024, 1, 17, 11, 15),
        ),
    ]
}

fn seed(
    id: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Task {
    Task {
        id: TaskId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        status,
        created_at,
        updated_at,
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}
