use crate::args::{ExportArgs, ExportKind};
use crate::commands::Out;
use crate::export::{write_csv, DonationRow, ExpenseRow};
use crate::{Config, Result};
use anyhow::bail;
use std::path::PathBuf;

/// Writes the donations or expenses for the selected year to a CSV file, most recent first.
///
/// # Errors
/// - Returns an error if there is nothing to export. No file is written in that case.
/// - Returns an error if the file cannot be written.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let store = config.store().await?;
    let year = args.year();
    let count = match args.kind() {
        ExportKind::Donations => {
            let donations = store.donations(year);
            if donations.is_empty() {
                bail!("There are no donations for {year} to export")
            }
            write_csv(args.out(), donations.iter().map(DonationRow::from)).await?;
            donations.len()
        }
        ExportKind::Expenses => {
            let expenses = store.expenses(year);
            if expenses.is_empty() {
                bail!("There are no expenses for {year} to export")
            }
            write_csv(args.out(), expenses.iter().map(ExpenseRow::from)).await?;
            expenses.len()
        }
    };
    Ok(Out::new(
        format!("Wrote {count} row(s) to '{}'", args.out().display()),
        args.out().to_path_buf(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YearFilter;
    use crate::test::TestEnv;
    use crate::utils;

    #[tokio::test]
    async fn test_export_expenses_for_year() {
        let env = TestEnv::new().await;
        let out_path = env.path().join("expenses-2023.csv");
        let args = ExportArgs::new(ExportKind::Expenses, YearFilter::Year(2023), &out_path);
        let out = export(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap(), &out_path);
        assert!(out.message().starts_with("Wrote 2 row(s)"));

        let csv = utils::read(&out_path).await.unwrap();
        assert_eq!(
            csv,
            "Date,Category,Description,Amount\n\
             2023-08-16,Pooja,2023 Homa,40000\n\
             2023-08-15,Food,2023 Annadanam,60000\n"
        );
    }

    #[tokio::test]
    async fn test_export_nothing_writes_no_file() {
        let env = TestEnv::new().await;
        let out_path = env.path().join("donations-2030.csv");
        let args = ExportArgs::new(ExportKind::Donations, YearFilter::Year(2030), &out_path);
        let err = export(env.config(), args).await.unwrap_err();
        assert_eq!(err.to_string(), "There are no donations for 2030 to export");
        assert!(!out_path.exists());
    }
}
