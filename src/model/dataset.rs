use crate::model::{Assignment, AttendanceRecord, Donation, Expense, RecordId};
use serde::{Deserialize, Serialize};

/// The whole persisted document. Every collection is optional on disk so that documents written
/// before assignments and attendance existed still load.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Dataset {
    /// Years that were registered explicitly, whether or not they have records yet.
    #[serde(default)]
    pub(crate) years: Vec<i32>,
    #[serde(default)]
    pub(crate) donations: Vec<Donation>,
    #[serde(default)]
    pub(crate) expenses: Vec<Expense>,
    #[serde(default)]
    pub(crate) assignments: Vec<Assignment>,
    #[serde(default)]
    pub(crate) attendance: Vec<AttendanceRecord>,
}

impl Dataset {
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// The highest id used in any collection.
    pub(crate) fn max_id(&self) -> Option<RecordId> {
        let donations = self.donations.iter().map(Donation::id);
        let expenses = self.expenses.iter().map(Expense::id);
        let assignments = self.assignments.iter().map(Assignment::id);
        let attendance = self.attendance.iter().map(AttendanceRecord::id);
        donations
            .chain(expenses)
            .chain(assignments)
            .chain(attendance)
            .max()
    }

    pub(crate) fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a stored document. Only a JSON object is a ledger; serde would otherwise accept an
    /// array for the struct and fill it positionally.
    pub(crate) fn from_json(s: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom(
                "expected the ledger document to be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let json = r#"{
            "years": [2025],
            "donations": [
                {"id": 1, "date": "2025-12-01", "name": "Ravi Sharma", "family": "Sharma Ji", "amount": 5001}
            ],
            "expenses": [
                {"id": 1733011200000, "date": "2025-12-02", "category": "Pooja", "description": "Flowers", "amount": "1500"}
            ]
        }"#;
        let data = Dataset::from_json(json).unwrap();
        assert!(data.assignments().is_empty());
        assert!(data.attendance().is_empty());
        assert_eq!(data.max_id(), Some(RecordId::new(1733011200000)));
    }

    #[test]
    fn test_empty_object_is_empty_dataset() {
        let data = Dataset::from_json("{}").unwrap();
        assert_eq!(data, Dataset::default());
        assert_eq!(data.max_id(), None);
    }

    #[test]
    fn test_array_document_is_rejected() {
        let err = Dataset::from_json("[[2031],[]]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert!(Dataset::from_json("[]").is_err());
        assert!(Dataset::from_json("2025").is_err());
        assert!(Dataset::from_json("null").is_err());
    }

    #[test]
    fn test_bad_document() {
        assert!(Dataset::from_json("{\"donations\": 7}").is_err());
        assert!(Dataset::from_json("not json").is_err());
    }
}
