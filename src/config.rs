//! Configuration file handling for the ledger.
//!
//! The configuration file is stored at `$LEDGER_HOME/config.json` and contains settings such as
//! how many backups to keep and where the ledger document lives.

use crate::backup::Backup;
use crate::storage::FileStorage;
use crate::store::{Store, StoreOptions};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "ledger";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const LEDGER_JSON: &str = "ledger.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$LEDGER_HOME` and from there it loads `$LEDGER_HOME/config.json`. It provides
/// paths to other items that are either configurable or are expected in a certain location within
/// the ledger home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its backups subdirectory and an initial `config.json` with
    /// default settings. The ledger document itself is created the first time the store is opened.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the ledger home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            backups,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the `ledger_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub async fn load(ledger_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = ledger_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Ledger home is missing, did you run 'ledger init'?")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            backups: root.join(BACKUPS),
            root,
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    pub fn seed_demo_data(&self) -> bool {
        self.config_file.seed_demo_data
    }

    /// Returns the stored `data_path` if it is absolute, otherwise resolves it against the ledger
    /// home directory.
    pub fn data_path(&self) -> PathBuf {
        let p = self.config_file.data_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::from_config(self)
    }

    /// Opens the ledger document at `data_path`, creating it if needed.
    pub async fn store(&self) -> Result<Store> {
        let storage = FileStorage::new(self.data_path()).with_backup(self.backup());
        Store::open(storage, StoreOptions::with_seed(self.seed_demo_data()))
            .await
            .with_context(|| format!("Unable to open the ledger at {}", self.data_path().display()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "ledger",
///   "config_version": 1,
///   "backup_copies": 5,
///   "seed_demo_data": true,
///   "data_path": "ledger.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "ledger"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// Whether a brand-new ledger starts out with demonstration data
    #[serde(default = "default_seed_demo_data")]
    seed_demo_data: bool,

    /// Path to the ledger document (optional, relative to the ledger home or absolute)
    /// Defaults to $LEDGER_HOME/ledger.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    data_path: Option<PathBuf>,
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            seed_demo_data: true,
            data_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Gets the data path. If None, defaults to `ledger.json`, relative to the ledger home.
    pub fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(LEDGER_JSON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YearFilter;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("ledger_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.backups().is_dir());
        assert!(config.config_path().is_file());
        assert_eq!(config.backup_copies(), 5);
        assert!(config.seed_demo_data());
        assert_eq!(config.data_path(), config.root().join("ledger.json"));
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        assert!(Config::create(dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_after_create() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(created.config_file, loaded.config_file);
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "ledger",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.backup_copies, 5);
        assert!(config.seed_demo_data);
        assert_eq!(config.data_path(), PathBuf::from(LEDGER_JSON));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "budget-sync",
            "config_version": 1,
            "backup_copies": 5
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let original = ConfigFile {
            backup_copies: 7,
            seed_demo_data: false,
            data_path: Some(PathBuf::from("/srv/ledger/2025.json")),
            ..ConfigFile::default()
        };
        original.save(&config_path).await.unwrap();
        let loaded = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("data_path"));
    }

    #[tokio::test]
    async fn test_store_uses_configured_data_path() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        utils::make_dir(dir.path().join(BACKUPS)).await.unwrap();
        ConfigFile {
            seed_demo_data: false,
            data_path: Some(PathBuf::from("events/ledger-2025.json")),
            ..ConfigFile::default()
        }
        .save(&config_path)
        .await
        .unwrap();
        utils::make_dir(dir.path().join("events")).await.unwrap();

        let config = Config::load(dir.path()).await.unwrap();
        let store = config.store().await.unwrap();
        assert!(store.donations(YearFilter::All).is_empty());
        assert!(config.root().join("events/ledger-2025.json").is_file());
    }

    #[tokio::test]
    async fn test_store_preserves_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        utils::write(config.data_path(), "{ not json").await.unwrap();

        let store = config.store().await.unwrap();
        assert!(store.corruption().is_some());
        assert_eq!(store.years(), vec![2025, 2024, 2023]);

        let mut entries = utils::read_dir(config.backups()).await.unwrap();
        let entry = entries.next_entry().await.unwrap().unwrap();
        assert!(entry.file_name().to_string_lossy().starts_with("corrupt."));
        assert_eq!(utils::read(&entry.path()).await.unwrap(), "{ not json");
    }
}
