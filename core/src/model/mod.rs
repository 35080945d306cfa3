pub mod task;

pub use task::{CreateTaskInput, Task, TaskId, TaskPatch, TaskStatus};
