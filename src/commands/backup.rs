use crate::backup::SNAPSHOT;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::PathBuf;

/// Saves a copy of the ledger document in the backups directory. Older snapshots beyond the
/// configured `backup_copies` are removed.
pub async fn backup(config: Config) -> Result<Out<PathBuf>> {
    let store = config.store().await?;
    let document = store
        .dataset()
        .to_json()
        .context("Unable to serialize the ledger")?;
    let path = config.backup().save_json(SNAPSHOT, &document).await?;
    Ok(Out::new(
        format!("Saved a snapshot to '{}'", path.display()),
        path,
    ))
}
