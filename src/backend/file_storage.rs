use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::backend::interface::{KeyValueStorage, BackendError, Result};

/// Key-value storage persisted as a single JSON object file.
/// Every write rewrites the whole file, and a write which fails
/// leaves both the file and the in-memory view unchanged.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>
}

impl FileStorage {
    /// Opens the storage file at `path`. A missing file is empty storage;
    /// it is only created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<FileStorage> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|source| BackendError::Corrupt { path: path.clone(), source })?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(BackendError::Io { path, source })
        };

        debug!("opened storage file {} with {} keys", path.display(), items.len());
        return Ok(FileStorage { path, items });
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `items` to disk through a temporary sibling file.
    fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        let io_err = |source: std::io::Error| BackendError::Io { path: self.path.clone(), source };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new(".")
        };
        fs::create_dir_all(parent).map_err(io_err)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|err| io_err(err.error))?;

        debug!("wrote storage file {}", self.path.display());
        return Ok(());
    }

    /// Applies `change` to a copy of the items and keeps it only once
    /// the copy has reached the file.
    fn commit(&mut self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut items = self.items.clone();
        change(&mut items);
        self.flush(&items)?;
        self.items = items;
        return Ok(());
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.commit(|items| {
            items.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        self.commit(|items| {
            items.remove(key);
        })
    }
}
