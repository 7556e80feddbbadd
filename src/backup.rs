//! Backup management for copies of the ledger document.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Prefix for copies of a document that could not be parsed.
pub const CORRUPT: &str = "corrupt";

/// Prefix for snapshots taken on request.
pub const SNAPSHOT: &str = "snapshot";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    pub fn new(backups_dir: impl Into<PathBuf>, backup_copies: u32) -> Self {
        Self {
            backups_dir: backups_dir.into(),
            backup_copies,
        }
    }

    /// Creates a new `Backup` instance from a `Config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backups(), config.backup_copies())
    }

    pub fn dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Saves `document` as a JSON backup file.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file.
    pub async fn save_json(&self, prefix: &str, document: &str) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        utils::write(&path, document)
            .await
            .context("Failed to write backup file")?;

        self.rotate(prefix).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let pattern_start = format!("{prefix}.{date}-");
        let mut max_seq: u32 = 0;

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            if name.starts_with(&pattern_start) {
                if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                    max_seq = max_seq.max(seq);
                }
            }
        }

        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().to_string();

            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove(&path).await?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match `{prefix}.{date}-{NNN}.json`.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let remainder = filename.strip_prefix(&format!("{prefix}.{date}-"))?;
    remainder.strip_suffix(".json")?.parse().ok()
}

fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("corrupt.2025-12-14-001.json", "corrupt", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("snapshot.2025-12-14-042.json", "snapshot", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("snapshot.2025-12-14-001.json", "corrupt", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("corrupt.2025-12-13-001.json", "corrupt", "2025-12-14"),
            None
        );
        // Not a number
        assert_eq!(
            parse_sequence_number("corrupt.2025-12-14-abc.json", "corrupt", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("corrupt.2025-12-14-001.json", "corrupt"));
        assert!(!is_backup_file("corrupt.2025-12-14-001.json", "snapshot"));
        assert!(!is_backup_file("corrupt.2025-12-14-001.txt", "corrupt"));
    }

    #[tokio::test]
    async fn test_save_json_sequences_and_rotates() {
        let dir = TempDir::new().unwrap();
        let backup = Backup::new(dir.path(), 2);

        let first = backup.save_json(SNAPSHOT, "{\"n\": 1}").await.unwrap();
        let second = backup.save_json(SNAPSHOT, "{\"n\": 2}").await.unwrap();
        let third = backup.save_json(SNAPSHOT, "{\"n\": 3}").await.unwrap();
        assert!(first.to_string_lossy().ends_with("-001.json"));
        assert!(third.to_string_lossy().ends_with("-003.json"));

        assert!(!first.exists());
        assert!(second.exists());
        assert_eq!(utils::read(&third).await.unwrap(), "{\"n\": 3}");

        // Other prefixes are left alone by rotation.
        let corrupt = backup.save_json(CORRUPT, "garbage").await.unwrap();
        assert!(corrupt.exists());
        assert!(second.exists());
    }
}
