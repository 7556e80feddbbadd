pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Failures the `Store` reports with a specific meaning. These travel inside `anyhow::Error`, so
/// use `err.downcast_ref::<LedgerError>()` to tell them apart from I/O failures.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// A record handed to a mutation was malformed and nothing was stored.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The persisted document could not be parsed. Recoverable: the store falls back to the seed
    /// data and keeps a copy of the bad document.
    #[error("The persisted ledger document is corrupt: {0}")]
    CorruptState(String),

    /// The highest possible record id is already in use.
    #[error("No record ids are left; the ledger already holds id {}", u64::MAX)]
    IdsExhausted,
}

impl LedgerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

#[test]
fn test_validation_message() {
    let e = LedgerError::validation("amount", "must not be negative, got -5");
    assert_eq!(e.to_string(), "Invalid amount: must not be negative, got -5");
    let any: Error = e.clone().into();
    assert_eq!(any.downcast_ref::<LedgerError>(), Some(&e));
}
