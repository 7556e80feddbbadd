use crate::commands::Out;
use crate::model::{Stats, YearFilter};
use crate::{Config, Result};

/// Shows total donations, total expenses, the balance and a breakdown of expenses by category.
pub async fn stats(config: Config, year: YearFilter) -> Result<Out<Stats>> {
    let store = config.store().await?;
    let stats = store.stats(year);
    let mut message = format!(
        "Stats for {year}\n  Donations: {}\n  Expenses:  {}\n  Balance:   {}",
        stats.total_donations(),
        stats.total_expenses(),
        stats.balance()
    );
    if !stats.expenses_by_category().is_empty() {
        message.push_str("\n  By category:");
        for (category, amount) in stats.expenses_by_category().iter() {
            message.push_str(&format!("\n    {category}: {amount}"));
        }
    }
    Ok(Out::new(message, stats))
}
