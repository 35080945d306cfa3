use taskpad_core::{Task, TaskId};

use crate::list::SHORT_ID_LEN;

#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(TaskId),
    NotFound,
    Ambiguous(Vec<TaskId>),
}

/// Resolves what the user typed to a task id.
///
/// An exact id always wins. Otherwise a prefix of at least `SHORT_ID_LEN`
/// chars is accepted when exactly one task starts with it.
pub fn resolve_id(tasks: &[Task], input: &str) -> Lookup {
    let input = input.trim();
    if let Some(task) = tasks.iter().find(|t| t.id.as_str() == input) {
        return Lookup::Found(task.id.clone());
    }
    if input.chars().count() < SHORT_ID_LEN {
        return Lookup::NotFound;
    }

    let mut matches: Vec<TaskId> = tasks
        .iter()
        .filter(|t| t.id.as_str().starts_with(input))
        .map(|t| t.id.clone())
        .collect();
    match matches.len() {
        0 => Lookup::NotFound,
        1 => Lookup::Found(matches.remove(0)),
        _ => Lookup::Ambiguous(matches),
    }
}
