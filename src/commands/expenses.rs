//! `ledger expenses` handlers.

use crate::args::AddExpenseArgs;
use crate::commands::{lines, Out};
use crate::model::{Expense, NewExpense, YearFilter};
use crate::{Config, Result};
use chrono::Local;

/// Lists the expenses for `year`, most recent first.
pub async fn list_expenses(config: Config, year: YearFilter) -> Result<Out<Vec<Expense>>> {
    let store = config.store().await?;
    let expenses = store.expenses(year);
    let heading = format!("{} expense(s) for {year}", expenses.len());
    let message = lines(heading, &expenses, |e| {
        let mut line = format!("#{} {} [{}] {}", e.id(), e.date(), e.category(), e.amount());
        if !e.description().is_empty() {
            line.push(' ');
            line.push_str(e.description());
        }
        line
    });
    Ok(Out::new(message, expenses))
}

/// Records an expense. The date defaults to today.
pub async fn add_expense(config: Config, args: AddExpenseArgs) -> Result<Out<Expense>> {
    let mut store = config.store().await?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let expense = store
        .add_expense(NewExpense::new(
            date,
            args.category,
            args.description,
            args.amount,
        ))
        .await?;
    Ok(Out::new(
        format!(
            "Recorded expense #{} of {} for {}",
            expense.id(),
            expense.amount(),
            expense.category()
        ),
        expense,
    ))
}
