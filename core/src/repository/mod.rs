pub mod error;
pub mod file;
pub mod memory;
pub mod task_storage;
pub mod traits;

// Re-export
pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use task_storage::{TaskStorage, DEFAULT_STORAGE_KEY};
pub use traits::KeyValueStore;
