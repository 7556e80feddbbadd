use crate::model::{date, Amount, RecordId};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An outbound spend. The category is free text and doubles as the aggregation key in `Stats`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub(crate) id: RecordId,
    #[serde(with = "date")]
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) amount: Amount,
}

impl Expense {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// The fields of an expense before the store has assigned it an id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(with = "date")]
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: Amount,
}

impl NewExpense {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }

    pub(crate) fn into_expense(self, id: RecordId) -> Expense {
        Expense {
            id,
            date: self.date,
            category: self.category,
            description: self.description,
            amount: self.amount,
        }
    }
}
