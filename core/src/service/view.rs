use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => task.status == TaskStatus::Pending,
            StatusFilter::Completed => task.status == TaskStatus::Completed,
        }
    }

    /// All → Pending → Completed → All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(format!("unknown filter: {s}")),
        }
    }
}

/// Filters, then orders pending before completed and newest-created first.
pub fn visible_tasks(tasks: &[Task], filter: StatusFilter) -> Vec<&Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    visible.sort_by(|a, b| compare_for_display(a, b));
    visible
}

fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    status_rank(a.status)
        .cmp(&status_rank(b.status))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Pending => 0,
        TaskStatus::Completed => 1,
    }
}

/// Totals shown beside each filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        Self {
            all: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }

    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Pending => self.pending,
            StatusFilter::Completed => self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tasks;
    use rstest::rstest;

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[rstest]
    #[case::all(StatusFilter::All, &["4", "2", "1", "3"])]
    #[case::pending(StatusFilter::Pending, &["4", "2", "1"])]
    #[case::completed(StatusFilter::Completed, &["3"])]
    fn test_visible_tasks_order(#[case] filter: StatusFilter, #[case] expected: &[&str]) {
        let tasks = seed_tasks();
        assert_eq!(ids(&visible_tasks(&tasks, filter)), expected);
    }

    #[test]
    fn test_view_does_not_reorder_source() {
        let tasks = seed_tasks();
        let _ = visible_tasks(&tasks, StatusFilter::All);
        assert_eq!(tasks[0].id.as_str(), "1");
    }

    #[test]
    fn test_counts() {
        let counts = StatusCounts::from_tasks(&seed_tasks());
        assert_eq!(counts, StatusCounts { all: 4, pending: 3, completed: 1 });
        assert_eq!(counts.for_filter(StatusFilter::Completed), 1);
    }

    #[test]
    fn test_filter_parse_and_cycle() {
        assert_eq!("Pending".parse::<StatusFilter>(), Ok(StatusFilter::Pending));
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Completed.next(), StatusFilter::All);
    }
}
