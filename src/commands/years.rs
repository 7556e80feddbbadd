//! `ledger years` handlers.

use crate::commands::{lines, Out};
use crate::{Config, Result};

/// Lists every tracked year, most recent first.
pub async fn list_years(config: Config) -> Result<Out<Vec<i32>>> {
    let store = config.store().await?;
    let years = store.years();
    let message = lines("Years:".to_string(), &years, |y| y.to_string());
    Ok(Out::new(message, years))
}

/// Registers `year`. A year that is already registered is reported, not treated as an error.
pub async fn add_year(config: Config, year: i32) -> Result<Out<Vec<i32>>> {
    let mut store = config.store().await?;
    let message = if store.add_year(year).await? {
        format!("Added year {year}")
    } else {
        format!("Year {year} already exists")
    };
    Ok(Out::new(message, store.years()))
}
