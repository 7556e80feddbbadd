//! Aggregates derived from the raw collections on demand.

use crate::model::{Amount, AttendanceRecord, AttendanceStatus, Donation, Expense, YearFilter};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

/// Totals for one year (or all years).
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Stats {
    pub(crate) year: YearFilter,
    pub(crate) total_donations: Amount,
    pub(crate) total_expenses: Amount,
    /// Donations minus expenses. Negative when the event is over budget.
    pub(crate) balance: Amount,
    pub(crate) expenses_by_category: CategoryTotals,
}

impl Stats {
    /// Computes the totals. `expenses` should already be in list order, since categories keep the
    /// order in which they are first seen.
    ///
    /// Totals that would not fit in an `Amount` are clamped and a warning is logged. The store
    /// refuses records that would cause this, so it only happens with documents edited by hand.
    pub(crate) fn compute<'a>(
        year: YearFilter,
        donations: impl IntoIterator<Item = &'a Donation>,
        expenses: impl IntoIterator<Item = &'a Expense>,
    ) -> Self {
        let mut overflowed = false;
        let mut total_donations = Amount::ZERO;
        for donation in donations {
            total_donations = add_or_clamp(total_donations, donation.amount(), &mut overflowed);
        }
        let mut total_expenses = Amount::ZERO;
        let mut expenses_by_category = CategoryTotals::default();
        for expense in expenses {
            total_expenses = add_or_clamp(total_expenses, expense.amount(), &mut overflowed);
            overflowed |= !expenses_by_category.add(expense.category(), expense.amount());
        }
        let balance = match total_donations.checked_sub(total_expenses) {
            Some(balance) => balance,
            None => {
                overflowed = true;
                total_donations.saturating_sub(total_expenses)
            }
        };
        if overflowed {
            warn!("The totals for {year} are too large to represent and have been clamped");
        }
        Self {
            year,
            total_donations,
            total_expenses,
            balance,
            expenses_by_category,
        }
    }

    pub fn year(&self) -> YearFilter {
        self.year
    }

    pub fn total_donations(&self) -> Amount {
        self.total_donations
    }

    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn expenses_by_category(&self) -> &CategoryTotals {
        &self.expenses_by_category
    }
}

fn add_or_clamp(total: Amount, amount: Amount, overflowed: &mut bool) -> Amount {
    total.checked_add(amount).unwrap_or_else(|| {
        *overflowed = true;
        total.saturating_add(amount)
    })
}

/// Per-category sums in first-occurrence order. Serializes as a JSON object.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct CategoryTotals(Vec<(String, Amount)>);

impl CategoryTotals {
    /// Adds `amount` to `category`. Returns false if the category total had to be clamped.
    fn add(&mut self, category: &str, amount: Amount) -> bool {
        match self.0.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => {
                let mut overflowed = false;
                *total = add_or_clamp(*total, amount, &mut overflowed);
                !overflowed
            }
            None => {
                self.0.push((category.to_string(), amount));
                true
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Amount> {
        self.0
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.0.iter().map(|(c, total)| (c.as_str(), *total))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, total) in &self.0 {
            map.serialize_entry(category, total)?;
        }
        map.end()
    }
}

/// Headcount figures for the attendance list.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceSummary {
    pub(crate) records: usize,
    pub(crate) coming: usize,
    pub(crate) not_coming: usize,
    /// Sum of `pax` over the records that are `Coming`.
    pub(crate) expected_pax: u64,
}

impl AttendanceSummary {
    pub(crate) fn compute<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut summary, record| {
                summary.records += 1;
                match record.status() {
                    AttendanceStatus::Coming => {
                        summary.coming += 1;
                        summary.expected_pax += u64::from(record.pax());
                    }
                    AttendanceStatus::NotComing => summary.not_coming += 1,
                }
                summary
            })
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn coming(&self) -> usize {
        self.coming
    }

    pub fn not_coming(&self) -> usize {
        self.not_coming
    }

    pub fn expected_pax(&self) -> u64 {
        self.expected_pax
    }
}
