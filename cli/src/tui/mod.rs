pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use taskpad_core::{KeyValueStore, TaskService};

use crate::tui::app::{App, InputMode};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run<S: KeyValueStore>(service: TaskService<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal UI stopped");
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: Backend, S: KeyValueStore>(terminal: &mut Terminal<B>, app: &mut App<S>) -> io::Result<()> {
    loop {
        app.refresh();
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if handle_key(app, key.code) {
            return Ok(());
        }
    }
}

/// Applies one key press. Returns `true` when the user asked to quit.
fn handle_key<S: KeyValueStore>(app: &mut App<S>, code: KeyCode) -> bool {
    match app.input_mode {
        InputMode::Normal => match code {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_status(),
            KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
            KeyCode::Char('a') => app.enter_add_mode(),
            KeyCode::Char('e') => app.enter_edit_title_mode(),
            KeyCode::Char('E') => app.enter_edit_description_mode(),
            KeyCode::Char('f') => app.cycle_filter(),
            _ => {}
        },
        // Anything but an explicit yes cancels.
        InputMode::ConfirmDelete => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            _ => app.cancel_delete(),
        },
        _ => match code {
            KeyCode::Enter => app.submit_command(),
            KeyCode::Esc => app.exit_input_mode(),
            KeyCode::Char(c) => app.input_char(c),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            _ => {}
        },
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpad_core::{MemoryStore, TaskStorage};

    fn app() -> App<MemoryStore> {
        App::new(TaskService::new(TaskStorage::new(MemoryStore::new())))
    }

    #[test]
    fn test_d_then_n_keeps_the_task() {
        let mut app = app();
        let before = app.service.list_all().to_vec();

        assert!(!handle_key(&mut app, KeyCode::Char('d')));
        assert!(!handle_key(&mut app, KeyCode::Char('n')));

        assert_eq!(app.service.list_all(), before.as_slice());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_delete_key_then_esc_keeps_the_task() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Delete);
        handle_key(&mut app, KeyCode::Esc);
        assert_eq!(app.service.list_all().len(), 4);
    }

    #[test]
    fn test_d_then_y_deletes_the_selected_task() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('d'));
        handle_key(&mut app, KeyCode::Char('y'));

        assert_eq!(app.service.list_all().len(), 3);
        assert!(app.service.list_all().iter().all(|t| t.id.as_str() != "4"));
    }

    #[test]
    fn test_q_quits_only_in_normal_mode() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('a'));
        assert!(!handle_key(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input, "q");
        handle_key(&mut app, KeyCode::Esc);
        assert!(handle_key(&mut app, KeyCode::Char('q')));
    }
}
