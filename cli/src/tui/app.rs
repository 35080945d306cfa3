use std::cell::Cell;
use std::rc::Rc;

use ratatui::widgets::TableState;
use taskpad_core::{
    validate_new_task, validate_patch, visible_tasks, KeyValueStore, StatusCounts, StatusFilter,
    Task, TaskPatch, TaskService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddingTitle,
    AddingDescription,
    EditingTitle,
    EditingDescription,
    ConfirmDelete,
}

impl InputMode {
    pub fn prompt(self) -> &'static str {
        match self {
            InputMode::Normal => "",
            InputMode::AddingTitle => " New task: title ",
            InputMode::AddingDescription => " New task: description ",
            InputMode::EditingTitle => " Edit title ",
            InputMode::EditingDescription => " Edit description ",
            InputMode::ConfirmDelete => "",
        }
    }

    /// Modes that collect typed text in the input box.
    pub fn is_text_entry(self) -> bool {
        !matches!(self, InputMode::Normal | InputMode::ConfirmDelete)
    }
}

pub struct App<S: KeyValueStore> {
    pub service: TaskService<S>,
    /// Derived view of the collection for the current filter.
    pub tasks: Vec<Task>,
    pub filter: StatusFilter,
    pub counts: StatusCounts,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub message: Option<String>,
    draft_title: Option<String>,
    dirty: Rc<Cell<bool>>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(mut service: TaskService<S>) -> App<S> {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        service.subscribe(move |_| flag.set(true));

        let mut app = App {
            service,
            tasks: Vec::new(),
            filter: StatusFilter::All,
            counts: StatusCounts::default(),
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            message: None,
            draft_title: None,
            dirty,
        };
        app.refresh();
        app
    }

    /// Rebuilds the view if the collection changed since the last call.
    pub fn refresh(&mut self) {
        if !self.dirty.replace(false) {
            return;
        }
        let selected_id = self.selected().map(|t| t.id.clone());
        let all = self.service.list_all();
        self.counts = StatusCounts::from_tasks(all);
        self.tasks = visible_tasks(all, self.filter).into_iter().cloned().collect();

        let index = selected_id
            .and_then(|id| self.tasks.iter().position(|t| t.id == id))
            .or_else(|| self.state.selected().map(|i| i.min(self.tasks.len().saturating_sub(1))));
        self.state.select(if self.tasks.is_empty() { None } else { index.or(Some(0)) });
    }

    pub fn selected(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    pub fn next(&mut self) {
        if self.tasks.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks.is_empty() { return; }

        let i = match self.state.selected() {
            Some(0) | None => self.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.dirty.set(true);
        self.refresh();
    }

    pub fn toggle_status(&mut self) {
        if let Some(id) = self.selected().map(|t| t.id.clone()) {
            self.service.toggle_status(&id);
            self.refresh();
        }
    }

    /// Asks before deleting; `confirm_delete` or `cancel_delete` follows.
    pub fn request_delete(&mut self) {
        if let Some(title) = self.selected().map(|t| t.title.clone()) {
            self.input_mode = InputMode::ConfirmDelete;
            self.message = Some(format!("Are you sure you want to delete \"{title}\"? (y/n)"));
        }
    }

    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        self.message = None;
        if let Some(id) = self.selected().map(|t| t.id.clone()) {
            if let Some(task) = self.service.delete_task(&id) {
                self.message = Some(format!("Deleted \"{}\"", task.title));
            }
            self.refresh();
        }
    }

    pub fn cancel_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        self.message = None;
    }

    pub fn enter_add_mode(&mut self) {
        self.draft_title = None;
        self.start_input(InputMode::AddingTitle, String::new());
    }

    pub fn enter_edit_title_mode(&mut self) {
        if let Some(title) = self.selected().map(|t| t.title.clone()) {
            self.start_input(InputMode::EditingTitle, title);
        }
    }

    pub fn enter_edit_description_mode(&mut self) {
        if let Some(description) = self.selected().map(|t| t.description.clone()) {
            self.start_input(InputMode::EditingDescription, description);
        }
    }

    fn start_input(&mut self, mode: InputMode, initial: String) {
        self.input_mode = mode;
        self.cursor_position = initial.chars().count();
        self.input = initial;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
        self.draft_title = None;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        match self.input_mode {
            InputMode::AddingTitle => {
                // Title is checked together with the description on the next step.
                self.draft_title = Some(self.input.clone());
                self.input_mode = InputMode::AddingDescription;
                self.input.clear();
                self.cursor_position = 0;
            }
            InputMode::AddingDescription => self.submit_add(),
            InputMode::EditingTitle => {
                let patch = self.selected().map(|t| TaskPatch::new(t.id.clone()).title(self.input.clone()));
                self.submit_edit(patch);
            }
            InputMode::EditingDescription => {
                let patch = self
                    .selected()
                    .map(|t| TaskPatch::new(t.id.clone()).description(self.input.clone()));
                self.submit_edit(patch);
            }
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    fn submit_add(&mut self) {
        let title = self.draft_title.clone().unwrap_or_default();
        match validate_new_task(&title, &self.input) {
            Ok(input) => {
                let task = self.service.add_task(input);
                self.exit_input_mode();
                self.refresh();
                if let Some(i) = self.tasks.iter().position(|t| t.id == task.id) {
                    self.state.select(Some(i));
                }
            }
            Err(errors) => {
                // Send the user back to whichever field failed first.
                if errors.title.is_some() {
                    self.input_mode = InputMode::AddingTitle;
                    self.input = title;
                    self.cursor_position = self.input.chars().count();
                }
                self.message = Some(errors.to_string());
            }
        }
    }

    fn submit_edit(&mut self, patch: Option<TaskPatch>) {
        let Some(patch) = patch else {
            self.exit_input_mode();
            return;
        };
        match validate_patch(patch) {
            Ok(patch) => {
                self.service.update_task(patch);
                self.exit_input_mode();
                self.refresh();
            }
            Err(errors) => self.message = Some(errors.to_string()),
        }
    }
}
