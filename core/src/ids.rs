use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::model::TaskId;

/// Source of fresh task identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> TaskId;
}

/// Random v4 uuids. The default for real sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> TaskId {
        TaskId::new(Uuid::new_v4().to_string())
    }
}

/// Counts upward from a starting value: `"1"`, `"2"`, ...
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> TaskId {
        TaskId::new(self.next.fetch_add(1, Ordering::Relaxed).to_string())
    }
}
