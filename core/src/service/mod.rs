pub mod task_service;
pub mod view;

pub use task_service::TaskService;
pub use view::{visible_tasks, StatusCounts, StatusFilter};
