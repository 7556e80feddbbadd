use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifies a record within its collection.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value)
    }
}

/// Hands out strictly increasing ids. It starts above every id already present in the dataset, so
/// ids never repeat within a collection no matter how quickly records are added.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct IdGenerator {
    /// `None` once `u64::MAX` has been handed out or is already taken.
    next: Option<u64>,
}

impl IdGenerator {
    /// Creates a generator whose first id is one past `highest_existing`.
    pub(crate) fn after(highest_existing: Option<RecordId>) -> Self {
        Self {
            next: match highest_existing {
                Some(id) => id.0.checked_add(1),
                None => Some(1),
            },
        }
    }

    pub(crate) fn next_id(&mut self) -> Result<RecordId, LedgerError> {
        let next = self.next.ok_or(LedgerError::IdsExhausted)?;
        self.next = next.checked_add(1);
        Ok(RecordId(next))
    }

    /// Gives back the most recent id after a failed insert so the sequence has no holes.
    pub(crate) fn release(&mut self, id: RecordId) {
        if id.0.checked_add(1) == self.next || (self.next.is_none() && id.0 == u64::MAX) {
            self.next = Some(id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_starts_after_existing() {
        let mut ids = IdGenerator::after(Some(RecordId::new(21)));
        assert_eq!(ids.next_id().unwrap(), RecordId::new(22));
        assert_eq!(ids.next_id().unwrap(), RecordId::new(23));
    }

    #[test]
    fn test_generator_empty_dataset() {
        let mut ids = IdGenerator::after(None);
        assert_eq!(ids.next_id().unwrap(), RecordId::new(1));
    }

    #[test]
    fn test_generator_release() {
        let mut ids = IdGenerator::after(None);
        let first = ids.next_id().unwrap();
        ids.release(first);
        assert_eq!(ids.next_id().unwrap(), first);
        // Releasing an older id is ignored.
        let _ = ids.next_id().unwrap();
        ids.release(first);
        assert_eq!(ids.next_id().unwrap(), RecordId::new(3));
    }

    #[test]
    fn test_generator_never_repeats_the_last_id() {
        let mut ids = IdGenerator::after(Some(RecordId::new(u64::MAX - 1)));
        let last = ids.next_id().unwrap();
        assert_eq!(last, RecordId::new(u64::MAX));
        assert_eq!(ids.next_id(), Err(LedgerError::IdsExhausted));

        ids.release(last);
        assert_eq!(ids.next_id(), Ok(last));

        let mut ids = IdGenerator::after(Some(RecordId::new(u64::MAX)));
        assert_eq!(ids.next_id(), Err(LedgerError::IdsExhausted));
    }

    #[test]
    fn test_record_id_json_is_integer() {
        let id = RecordId::new(1733011200000);
        assert_eq!(serde_json::to_string(&id).unwrap(), "1733011200000");
        let back: RecordId = serde_json::from_str("1733011200000").unwrap();
        assert_eq!(back, id);
    }
}
