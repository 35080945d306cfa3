use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};
use taskpad_core::{KeyValueStore, StatusFilter, TaskStatus};
use unicode_width::UnicodeWidthStr;

use crate::list::{local_day, local_time, status_icon};
use crate::tui::app::App;

const HELP: &str = "j/k: Navigate | space: Toggle | a: Add | e/E: Edit | d: Delete | f: Filter | q: Quit";

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(main_chunks[1]);

    draw_task_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);
    draw_input(f, app, main_chunks[2]);

    let footer = match &app.message {
        Some(message) => Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(footer.alignment(Alignment::Center), main_chunks[3]);
}

fn draw_header<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let tab = |filter: StatusFilter, label: &'static str| {
        let text = format!(" {} ({}) ", label, app.counts.for_filter(filter));
        if app.filter == filter {
            Span::styled(text, Style::default().fg(Color::Black).bg(Color::Cyan))
        } else {
            Span::raw(text)
        }
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("TASKPAD  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        tab(StatusFilter::All, "All"),
        tab(StatusFilter::Pending, "Pending"),
        tab(StatusFilter::Completed, "Completed"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_task_list<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let rows: Vec<Row> = app.tasks.iter().map(|task| {
        let title_style = match task.status {
            TaskStatus::Pending => Style::default().add_modifier(Modifier::BOLD),
            TaskStatus::Completed => Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
        };

        Row::new(vec![
            Span::raw(status_icon(task.status)),
            Span::raw(local_day(task.created_at)),
            Span::styled(task.title.clone(), title_style),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(6),  // Created
            Constraint::Min(10),    // Title
        ]
    )
    .header(Row::new(vec!["St", "Made", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);
    let Some(task) = app.selected() else {
        f.render_widget(block, area);
        return;
    };

    let detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(task.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(task.status.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Blue)),
            Span::raw(local_time(task.created_at)),
        ]),
        Line::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::Blue)),
            Span::raw(local_time(task.updated_at)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Description:", Style::default().fg(Color::Blue))),
        Line::from(task.description.as_str()),
    ];

    let detail_block = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(detail_block, area);
}

fn draw_input<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let active = app.input_mode.is_text_entry();
    let style = if active { Style::default().fg(Color::Yellow) } else { Style::default() };
    let inner_width = area.width.saturating_sub(2);
    let (scroll, column) = input_cursor(&app.input, app.cursor_position, inner_width);
    let input = Paragraph::new(app.input.as_str())
        .style(style)
        .scroll((0, scroll))
        .block(Block::default().title(app.input_mode.prompt()).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if active {
        f.set_cursor_position(Position::new(area.x + 1 + column, area.y + 1));
    }
}

/// Horizontal scroll and cursor column, both in terminal cells.
///
/// The text scrolls once the cursor would leave a box `width` cells wide.
fn input_cursor(input: &str, cursor_chars: usize, width: u16) -> (u16, u16) {
    let before: String = input.chars().take(cursor_chars).collect();
    let cells = u16::try_from(before.width()).unwrap_or(u16::MAX);
    let last = width.saturating_sub(1);
    let scroll = cells.saturating_sub(last);
    (scroll, cells - scroll)
}
