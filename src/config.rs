use std::{fs, path::{Path, PathBuf}};
use serde::{Serialize, Deserialize};
use anyhow::{self, Context};

use crate::backend::{DEFAULT_KEY, FileStorage, PersistentStore};

pub const DEFAULT_STORE_PATH: &str = "expenses.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub key: String
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            key: DEFAULT_KEY.to_owned()
        }
    }
}

impl StorageConfig {
    pub fn open_store(&self) -> anyhow::Result<PersistentStore<FileStorage>> {
        let storage = FileStorage::open(&self.path)
            .with_context(|| format!("failed to open expense store {}", self.path.display()))?;
        return Ok(PersistentStore::with_key(storage, &self.key));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub storage: StorageConfig
}

impl TrackerConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::{StorageConfig, TrackerConfig};
    use crate::backend::KeyValueStorage;

    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("tracker.toml");
        std::fs::write(&path, content).unwrap();
        return path;
    }

    #[test]
    fn full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[storage]\npath = \"/tmp/mine.json\"\nkey = \"household\"\n");
        let config = TrackerConfig::read(path).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/mine.json"));
        assert_eq!(config.storage.key, "household");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[storage]\nkey = \"household\"\n");
        let config = TrackerConfig::read(path).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("expenses.json"));

        let path = write_config(&dir, "");
        assert_eq!(TrackerConfig::read(path).unwrap(), TrackerConfig::default());
    }

    #[test]
    fn unreadable_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TrackerConfig::read(dir.path().join("absent.toml")).is_err());

        let path = write_config(&dir, "[storage\n");
        let err = TrackerConfig::read(path).unwrap_err();
        assert_eq!(err.to_string(), "failed to parse config file");
    }

    #[test]
    fn open_store_uses_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            path: dir.path().join("store.json"),
            key: "household".to_owned()
        };
        let mut store = config.open_store().unwrap();
        store.save_all(&[]).unwrap();

        let reopened = config.open_store().unwrap();
        assert_eq!(reopened.storage().get_item("household").as_deref(), Some("[]"));
    }
}
