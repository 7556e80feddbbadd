use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the ledger home directory, its backups subdirectory and an initial `config.json` with
/// default settings, then opens the ledger once so that the document exists on disk.
///
/// # Arguments
/// - `ledger_home` - The directory that will be the root of the ledger, e.g. `$HOME/ledger`
///
/// # Errors
/// - Returns an error if `config.json` already exists.
/// - Returns an error if any file operations fail.
pub async fn init(ledger_home: &Path) -> Result<Out<()>> {
    let config = Config::create(ledger_home)
        .await
        .context("Unable to create the ledger home directory and config")?;
    let _store = config.store().await?;
    Ok(format!(
        "Successfully created the ledger at '{}'",
        config.data_path().display()
    )
    .into())
}
