//! `ledger donations` handlers.

use crate::args::AddDonationArgs;
use crate::commands::{lines, with_family, Out};
use crate::model::{Donation, NewDonation, YearFilter};
use crate::{Config, Result};
use chrono::Local;

/// Lists the donations for `year`, most recent first.
pub async fn list_donations(config: Config, year: YearFilter) -> Result<Out<Vec<Donation>>> {
    let store = config.store().await?;
    let donations = store.donations(year);
    let heading = format!("{} donation(s) for {year}", donations.len());
    let message = lines(heading, &donations, |d| {
        format!(
            "#{} {} {} {}",
            d.id(),
            d.date(),
            with_family(d.name(), d.family()),
            d.amount()
        )
    });
    Ok(Out::new(message, donations))
}

/// Records a donation. The date defaults to today.
///
/// # Errors
/// - Returns an error if the name is blank or the amount is negative.
/// - Returns an error if the ledger cannot be saved.
pub async fn add_donation(config: Config, args: AddDonationArgs) -> Result<Out<Donation>> {
    let mut store = config.store().await?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let donation = store
        .add_donation(NewDonation::new(date, args.name, args.family, args.amount))
        .await?;
    Ok(Out::new(
        format!(
            "Recorded donation #{} of {} from {}",
            donation.id(),
            donation.amount(),
            donation.name()
        ),
        donation,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use crate::LedgerError;
    use chrono::NaiveDate;

    fn args(name: &str, amount: i32, date: Option<NaiveDate>) -> AddDonationArgs {
        AddDonationArgs {
            name: name.to_string(),
            family: String::new(),
            amount: Amount::from(amount),
            date,
        }
    }

    #[tokio::test]
    async fn test_list_donations_for_year() {
        let env = TestEnv::new().await;
        let out = list_donations(env.config(), YearFilter::Year(2024))
            .await
            .unwrap();
        let donations = out.structure().unwrap();
        assert_eq!(donations.len(), 2);
        assert_eq!(donations[0].name(), "Old Donor 2");
        assert!(out.message().starts_with("2 donation(s) for 2024"));
        assert!(out.message().contains("Old Donor 1 (Fam A) 10,000.00"));
    }

    #[tokio::test]
    async fn test_add_donation_persists() {
        let env = TestEnv::new().await;
        let date = NaiveDate::from_ymd_opt(2025, 12, 24);
        let out = add_donation(env.config(), args("Meena Iyer", 1100, date))
            .await
            .unwrap();
        assert_eq!(
            out.message(),
            "Recorded donation #23 of 1,100.00 from Meena Iyer"
        );

        let listed = list_donations(env.config(), YearFilter::Year(2025))
            .await
            .unwrap();
        assert_eq!(listed.structure().unwrap()[0].name(), "Meena Iyer");
    }

    #[tokio::test]
    async fn test_add_donation_defaults_to_today() {
        let env = TestEnv::empty().await;
        let out = add_donation(env.config(), args("Walk-in", 51, None))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().date(), Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_add_donation_blank_name() {
        let env = TestEnv::empty().await;
        let err = add_donation(env.config(), args("  ", 51, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::Validation { field: "name", .. })
        ));
    }
}
