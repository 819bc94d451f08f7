use std::path::PathBuf;

use thiserror::Error;

/// String-keyed storage of string values, the shape
/// `PersistentStore` writes its serialised list into.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a key which is not present is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("storage file {path} is not a valid key-value object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error
    },
    #[error("failed to serialise expenses: {0}")]
    Serialize(#[from] serde_json::Error)
}

pub type Result<T> = std::result::Result<T, BackendError>;
