//! CSV export of the donation and expense lists.

use crate::model::{Donation, Expense};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// "Date","Name","Family","Amount"
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DonationRow {
    pub(crate) date: String,
    pub(crate) name: String,
    pub(crate) family: String,
    pub(crate) amount: String,
}

impl From<&Donation> for DonationRow {
    fn from(d: &Donation) -> Self {
        Self {
            date: d.date().to_string(),
            name: d.name().to_string(),
            family: d.family().to_string(),
            amount: d.amount().value().normalize().to_string(),
        }
    }
}

// "Date","Category","Description","Amount"
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ExpenseRow {
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) amount: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            date: e.date().to_string(),
            category: e.category().to_string(),
            description: e.description().to_string(),
            amount: e.amount().value().normalize().to_string(),
        }
    }
}

/// Renders `rows` as CSV with a header line.
pub(crate) fn to_csv<R>(rows: impl IntoIterator<Item = R>) -> Result<String>
where
    R: Serialize,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("Unable to write CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish CSV output: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

pub(crate) async fn write_csv<R>(path: &Path, rows: impl IntoIterator<Item = R>) -> Result<()>
where
    R: Serialize,
{
    let csv = to_csv(rows)?;
    crate::utils::write(path, csv).await
}
