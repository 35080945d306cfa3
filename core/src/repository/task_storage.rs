use crate::model::Task;
use crate::repository::{KeyValueStore, StorageError};

/// Slot the task collection lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "personal-task-manager-tasks";

/// Saves and loads the whole task collection as one JSON blob under a fixed key.
#[derive(Debug, Clone)]
pub struct TaskStorage<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TaskStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the persisted collection.
    ///
    /// Anything short of a well-formed blob yields `None`: a missing key, a
    /// read error, or content that fails to decode. Callers treat `None`
    /// exactly like a first run.
    pub fn load(&self) -> Option<Vec<Task>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no persisted tasks");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read persisted tasks");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                tracing::debug!(key = %self.key, count = tasks.len(), "loaded persisted tasks");
                Some(tasks)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "persisted tasks are malformed, ignoring");
                None
            }
        }
    }

    pub fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(tasks)?;
        self.store.set(&self.key, &blob)?;
        tracing::debug!(key = %self.key, count = tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreateTaskInput, TaskId, TaskStatus};
    use crate::repository::MemoryStore;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn tasks() -> Vec<Task> {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let mut done = Task::new(
            TaskId::from("b"),
            CreateTaskInput::new("Set up repo", "Create public repo with branching"),
            created,
        );
        done.status = TaskStatus::Completed;
        // Sub-microsecond precision must survive the trip.
        done.updated_at = created + chrono::Duration::nanoseconds(123_456_789);
        vec![
            Task::new(
                TaskId::from("a"),
                CreateTaskInput::new("Buy milk", "2% lowfat, one gallon"),
                created,
            ),
            done,
        ]
    }

    #[test]
    fn test_round_trip_is_exact() {
        let mut storage = TaskStorage::new(MemoryStore::new());
        let original = tasks();
        storage.save(&original).unwrap();
        assert_eq!(storage.load(), Some(original));
    }

    #[test]
    fn test_round_trip_empty_collection() {
        let mut storage = TaskStorage::new(MemoryStore::new());
        storage.save(&[]).unwrap();
        assert_eq!(storage.load(), Some(Vec::new()));
    }

    #[test]
    fn test_wire_format() {
        let mut storage = TaskStorage::new(MemoryStore::new());
        storage.save(&tasks()).unwrap();
        let raw = storage.store().raw(DEFAULT_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();

        assert_eq!(value[1]["status"], "completed");
        assert_eq!(value[1]["createdAt"], "2024-01-15T10:00:00Z");
        assert_eq!(value[1]["updatedAt"], "2024-01-15T10:00:00.123456789Z");
    }

    #[test]
    fn test_reads_millisecond_iso_timestamps() {
        let raw = r#"[{"id":"1","title":"Complete assignment","description":"Build a personal task manager","status":"pending","createdAt":"2024-01-15T10:00:00.000Z","updatedAt":"2024-01-15T10:00:00.000Z"}]"#;
        let storage = TaskStorage::new(MemoryStore::new().with_entry(DEFAULT_STORAGE_KEY, raw));
        let loaded = storage.load().unwrap();
        assert_eq!(loaded[0].created_at, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
    }

    #[rstest]
    #[case::malformed("{malformed")]
    #[case::wrong_shape(r#"{"id":"1"}"#)]
    #[case::bad_status(r#"[{"id":"1","title":"t","description":"d","status":"archived","createdAt":"2024-01-15T10:00:00Z","updatedAt":"2024-01-15T10:00:00Z"}]"#)]
    #[case::bad_timestamp(r#"[{"id":"1","title":"t","description":"d","status":"pending","createdAt":"yesterday","updatedAt":"2024-01-15T10:00:00Z"}]"#)]
    fn test_unreadable_content_loads_as_none(#[case] raw: &str) {
        let storage = TaskStorage::new(MemoryStore::new().with_entry(DEFAULT_STORAGE_KEY, raw));
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_missing_key_loads_as_none() {
        let storage = TaskStorage::new(MemoryStore::new());
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_clear_removes_blob() {
        let mut storage = TaskStorage::with_key(MemoryStore::new(), "custom");
        storage.save(&tasks()).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load(), None);
        assert_eq!(storage.store().raw("custom"), None);
    }

    #[test]
    fn test_save_reports_quota_failure() {
        let mut storage = TaskStorage::new(MemoryStore::with_quota(16));
        let err = storage.save(&tasks()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    }
}
