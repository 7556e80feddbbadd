//! Places the `Store` can keep its serialized document.
//!
//! The `Store` only ever reads or replaces the whole document, so a backend is a single slot that
//! holds one string.

use crate::{utils, Backup, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// A single slot holding the serialized ledger document.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the stored document, or `None` if nothing has been stored yet.
    async fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored document.
    async fn save(&self, document: &str) -> Result<()>;

    /// Keeps a copy of a document that could not be parsed before it gets overwritten. Returns
    /// where the copy went, if anywhere.
    async fn preserve_corrupt(&self, _document: &str) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Stores the document as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    backup: Option<Backup>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup: None,
        }
    }

    /// Corrupt documents are copied into `backup` before they are replaced.
    pub fn with_backup(mut self, backup: Backup) -> Self {
        self.backup = Some(backup);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("ledger.json"));
        let rand = uuid::Uuid::new_v4().simple().to_string();
        self.path.with_file_name(format!(".{name}.{rand}.tmp"))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn load(&self) -> Result<Option<String>> {
        trace!("load from {}", self.path.display());
        utils::read_optional(&self.path).await
    }

    async fn save(&self, document: &str) -> Result<()> {
        // Write and sync beside the target, then rename, so the document is never half-written.
        let temp = self.temp_path();
        if let Err(e) = utils::write_synced(&temp, document).await {
            let _ = utils::remove(&temp).await;
            return Err(e);
        }
        if let Err(e) = utils::rename(&temp, &self.path).await {
            let _ = utils::remove(&temp).await;
            return Err(e);
        }
        trace!("saved {} bytes to {}", document.len(), self.path.display());
        Ok(())
    }

    async fn preserve_corrupt(&self, document: &str) -> Result<Option<PathBuf>> {
        match &self.backup {
            Some(backup) => Ok(Some(
                backup.save_json(crate::backup::CORRUPT, document).await?,
            )),
            None => Ok(None),
        }
    }
}

/// Keeps the document in memory. Clones share the same slot, which lets a test hold on to a
/// handle and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.into()))),
        }
    }

    /// Returns a copy of whatever is currently stored.
    pub fn document(&self) -> Option<String> {
        match self.document.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, document: &str) {
        let mut guard = match self.document.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(document.to_string());
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.document())
    }

    async fn save(&self, document: &str) -> Result<()> {
        self.set(document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("ledger.json"));
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_save_replaces() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("ledger.json"));
        storage.save("{\"years\": [2024]}").await.unwrap();
        storage.save("{\"years\": [2025]}").await.unwrap();
        assert_eq!(
            storage.load().await.unwrap().as_deref(),
            Some("{\"years\": [2025]}")
        );

        // Only the document remains, no temporary files.
        let mut entries = utils::read_dir(dir.path()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_file_storage_failed_save_keeps_old_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let storage = FileStorage::new(&path);
        storage.save("{\"years\": [2024]}").await.unwrap();

        let missing = FileStorage::new(dir.path().join("gone").join("ledger.json"));
        assert!(missing.save("{}").await.is_err());
        assert_eq!(
            storage.load().await.unwrap().as_deref(),
            Some("{\"years\": [2024]}")
        );
    }

    #[tokio::test]
    async fn test_file_storage_preserve_corrupt() {
        let dir = TempDir::new().unwrap();
        let backups = dir.path().join(".backups");
        utils::make_dir(&backups).await.unwrap();

        let without = FileStorage::new(dir.path().join("ledger.json"));
        assert_eq!(without.preserve_corrupt("{oops").await.unwrap(), None);

        let with = without.with_backup(Backup::new(&backups, 5));
        let copy = with.preserve_corrupt("{oops").await.unwrap().unwrap();
        assert!(copy.starts_with(&backups));
        assert_eq!(utils::read(&copy).await.unwrap(), "{oops");
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        assert_eq!(storage.load().await.unwrap(), None);
        storage.save("{}").await.unwrap();
        assert_eq!(handle.document().as_deref(), Some("{}"));
    }
}
