use chrono::{DateTime, Local, Utc};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskpad_core::{visible_tasks, StatusCounts, StatusFilter, Task, TaskStatus};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 40;
/// Shortest id prefix the table prints and the other commands accept.
pub const SHORT_ID_LEN: usize = 8;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn show_list(tasks: &[Task], filter: StatusFilter) {
    let counts = StatusCounts::from_tasks(tasks);
    println!(
        "All ({}) | Pending ({}) | Completed ({})",
        counts.all, counts.pending, counts.completed
    );

    let visible = visible_tasks(tasks, filter);
    if visible.is_empty() {
        match filter {
            StatusFilter::All => println!("No tasks found."),
            _ => println!("No {} tasks found.", filter),
        }
        return;
    }

    let rows: Vec<TaskRow> = visible
        .into_iter()
        .map(|task| TaskRow {
            id: short_id(task.id.as_str()).to_string(),
            status: status_icon(task.status),
            title: truncate_to_width(&task.title, TITLE_WIDTH),
            created: local_time(task.created_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{table}");
}

pub fn show_detail(task: &Task) {
    println!("Title:       {}", task.title);
    println!("ID:          {}", task.id);
    println!("Status:      {}", task.status);
    println!("Created:     {}", local_time(task.created_at));
    println!("Updated:     {}", local_time(task.updated_at));
    println!();
    println!("{}", task.description);
}

pub fn local_time(at: DateTime<Utc>) -> String {
    DateTime::<Local>::from(at).format("%Y-%m-%d %H:%M").to_string()
}

/// Month and day in local time, for narrow columns.
pub fn local_day(at: DateTime<Utc>) -> String {
    DateTime::<Local>::from(at).format("%m-%d").to_string()
}

pub fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "☐",
        TaskStatus::Completed => "✔",
    }
}

/// Uuids are shortened to `SHORT_ID_LEN` chars; short ids are shown whole.
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
