//! Form-level checks on task text, run before anything reaches the store.

use std::fmt;

use crate::model::{CreateTaskInput, TaskPatch};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Per-field messages. A field is `None` when it passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.title.iter().chain(self.description.iter()).map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.messages().collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Trims and checks both fields, returning the cleaned input.
pub fn validate_new_task(title: &str, description: &str) -> Result<CreateTaskInput, ValidationErrors> {
    let title = title.trim();
    let description = description.trim();
    let errors = ValidationErrors {
        title: check_field("Title", title, TITLE_MIN_CHARS, TITLE_MAX_CHARS),
        description: check_field(
            "Description",
            description,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        ),
    };
    if errors.is_empty() {
        Ok(CreateTaskInput::new(title, description))
    } else {
        Err(errors)
    }
}

/// Checks only the text fields the patch supplies.
pub fn validate_patch(mut patch: TaskPatch) -> Result<TaskPatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(title) = patch.title.as_mut() {
        *title = title.trim().to_string();
        errors.title = check_field("Title", title.as_str(), TITLE_MIN_CHARS, TITLE_MAX_CHARS);
    }
    if let Some(description) = patch.description.as_mut() {
        *description = description.trim().to_string();
        errors.description = check_field(
            "Description",
            description.as_str(),
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        );
    }
    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

fn check_field(label: &str, value: &str, min: usize, max: usize) -> Option<String> {
    let len = value.chars().count();
    if len == 0 {
        Some(format!("{label} is required"))
    } else if len < min {
        Some(format!("{label} must be at least {min} characters long"))
    } else if len > max {
        Some(format!("{label} must be at most {max} characters long"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use rstest::rstest;

    #[test]
    fn test_valid_input_is_trimmed() {
        let input = validate_new_task("  Buy milk ", " 2% lowfat, one gallon\n").unwrap();
        assert_eq!(input, CreateTaskInput::new("Buy milk", "2% lowfat, one gallon"));
    }

    #[rstest]
    #[case::empty("   ", Some("Title is required"))]
    #[case::short(" ab ", Some("Title must be at least 3 characters long"))]
    #[case::min("abc", None)]
    #[case::long(&"x".repeat(101), Some("Title must be at most 100 characters long"))]
    #[case::max_multibyte(&"é".repeat(100), None)]
    fn test_title_rules(#[case] title: &str, #[case] expected: Option<&str>) {
        let result = validate_new_task(title, "a long enough description");
        assert_eq!(result.err().and_then(|e| e.title).as_deref(), expected);
    }

    #[test]
    fn test_reports_both_fields() {
        let errors = validate_new_task("", "short").unwrap_err();
        assert_eq!(errors.title.as_deref(), Some("Title is required"));
        assert_eq!(
            errors.description.as_deref(),
            Some("Description must be at least 10 characters long")
        );
        assert_eq!(
            errors.to_string(),
            "Title is required; Description must be at least 10 characters long"
        );
    }

    #[test]
    fn test_patch_checks_only_supplied_fields() {
        let patch = TaskPatch::new(TaskId::from("1")).title("  New title ");
        let patch = validate_patch(patch).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert_eq!(patch.description, None);

        let bad = TaskPatch::new(TaskId::from("1")).description("tiny");
        let errors = validate_patch(bad).unwrap_err();
        assert!(errors.title.is_none());
        assert!(errors.description.is_some());
    }
}
