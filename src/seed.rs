//! Demonstration data installed the first time a ledger is opened. It covers three past
//! gatherings so that every view has something to show.

use crate::model::{Amount, Dataset, Donation, Expense, RecordId};
use chrono::NaiveDate;

/// Returns the seed dataset.
pub(crate) fn seed_dataset() -> Dataset {
    Dataset {
        years: vec![2025, 2024, 2023],
        donations: DONATIONS
            .iter()
            .map(|&(id, date, name, family, amount)| Donation {
                id: RecordId::new(id),
                date: seed_date(date),
                name: name.to_string(),
                family: family.to_string(),
                amount: Amount::from(amount),
            })
            .collect(),
        expenses: EXPENSES
            .iter()
            .map(|&(id, date, category, description, amount)| Expense {
                id: RecordId::new(id),
                date: seed_date(date),
                category: category.to_string(),
                description: description.to_string(),
                amount: Amount::from(amount),
            })
            .collect(),
        assignments: Vec::new(),
        attendance: Vec::new(),
    }
}

fn seed_date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

type Ymd = (i32, u32, u32);

const DONATIONS: &[(u64, Ymd, &str, &str, i64)] = &[
    (1, (2025, 12, 1), "Ravi Sharma", "Sharma Ji", 5001),
    (2, (2025, 12, 5), "Anjali Verma", "Verma Ji", 2100),
    (3, (2025, 12, 10), "K. Gupta", "Gupta Traders", 11000),
    (4, (2025, 12, 15), "Anonymous", "-", 501),
    (5, (2025, 12, 20), "Suresh Reddy", "Reddy Builders", 5000),
    (11, (2024, 5, 15), "Old Donor 1", "Fam A", 10000),
    (12, (2024, 6, 1), "Old Donor 2", "Fam B", 5000),
    (21, (2023, 8, 10), "Ancient Donor", "Fam C", 8000),
];

const EXPENSES: &[(u64, Ymd, &str, &str, i64)] = &[
    (1, (2025, 12, 2), "Pooja", "Idol Decoration Items", 1500),
    (2, (2025, 12, 12), "Food", "Advance for Catering", 5000),
    (3, (2025, 12, 18), "Travel", "Bus Booking Advance", 8000),
    (11, (2024, 5, 20), "Food", "2024 Feast", 70000),
    (12, (2024, 5, 21), "Pooja", "2024 Rituals", 30000),
    (13, (2024, 5, 22), "Misc", "Tent House", 50000),
    (21, (2023, 8, 15), "Food", "2023 Annadanam", 60000),
    (22, (2023, 8, 16), "Pooja", "2023 Homa", 40000),
];
