use crate::model::{date, Amount, RecordId};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inbound contribution from a donor.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Donation {
    pub(crate) id: RecordId,
    #[serde(with = "date")]
    pub(crate) date: NaiveDate,
    /// The donor's name.
    pub(crate) name: String,
    /// The family or household the donation is credited to.
    #[serde(default)]
    pub(crate) family: String,
    pub(crate) amount: Amount,
}

impl Donation {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// The fields of a donation before the store has assigned it an id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    #[serde(with = "date")]
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub family: String,
    pub amount: Amount,
}

impl NewDonation {
    pub fn new(
        date: NaiveDate,
        name: impl Into<String>,
        family: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            date,
            name: name.into(),
            family: family.into(),
            amount: amount.into(),
        }
    }

    pub(crate) fn into_donation(self, id: RecordId) -> Donation {
        Donation {
            id,
            date: self.date,
            name: self.name,
            family: self.family,
            amount: self.amount,
        }
    }
}

#[test]
fn test_donation_without_family_deserializes() {
    let json = r#"{"id": 4, "date": "2025-12-15", "name": "Anonymous", "amount": 501}"#;
    let donation: Donation = serde_json::from_str(json).unwrap();
    assert_eq!(donation.family(), "");
    assert_eq!(donation.year(), 2025);
    assert_eq!(donation.amount(), Amount::from(501));
}
