use std::path::PathBuf;

use crate::repository::{FileStore, StorageError, TaskStorage, DEFAULT_STORAGE_KEY};

const DEFAULT_DIR_NAME: &str = ".taskpad";

/// Where and under which key the task collection is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Config {
    /// Fills anything not supplied with defaults: `~/.taskpad` and the
    /// standard storage key.
    pub fn resolve(data_dir: Option<PathBuf>, storage_key: Option<String>) -> Result<Self, StorageError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Config {
            data_dir,
            storage_key: storage_key.unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
        })
    }

    pub fn open_storage(&self) -> Result<TaskStorage<FileStore>, StorageError> {
        let store = FileStore::open(&self.data_dir)?;
        store.path_for(&self.storage_key)?;
        Ok(TaskStorage::with_key(store, self.storage_key.clone()))
    }
}

fn default_data_dir() -> Result<PathBuf, StorageError> {
    let home_dir = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}
