mod json_store;
mod interface;
mod memory_storage;
mod file_storage;

pub use interface::{KeyValueStorage, Result, BackendError};
pub use json_store::{PersistentStore, DEFAULT_KEY};
pub use memory_storage::MemoryStorage;
pub use file_storage::FileStorage;
