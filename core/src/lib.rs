pub mod config;
pub mod ids;
pub mod input;
pub mod model;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;
pub mod time;

pub use config::Config;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use input::{validate_new_task, validate_patch, ValidationErrors};
pub use model::{CreateTaskInput, Task, TaskId, TaskPatch, TaskStatus};
pub use repository::{FileStore, KeyValueStore, MemoryStore, StorageError, TaskStorage};
pub use seed::seed_tasks;
pub use service::{visible_tasks, StatusCounts, StatusFilter, TaskService};
pub use store::{reduce, TaskAction};
pub use time::StepClock;
