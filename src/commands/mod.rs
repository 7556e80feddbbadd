//! Command handlers for the ledger CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod assignments;
mod attendance;
mod backup;
mod donations;
mod expenses;
mod export;
mod init;
mod stats;
mod years;

use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use assignments::{add_assignment, list_assignments};
pub use attendance::{add_attendance, list_attendance, update_attendance, AttendanceList};
pub use backup::backup;
pub use donations::{add_donation, list_donations};
pub use expenses::{add_expense, list_expenses};
pub use export::export;
pub use init::init;
pub use stats::stats;
pub use years::{add_year, list_years};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to the command line.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }

    /// Like `print`, but when `json` is true the structured data is written to stdout so that it
    /// can be piped to other programs.
    pub fn emit(&self, json: bool) -> crate::Result<()> {
        if !json {
            self.print();
            return Ok(());
        }
        info!("{}", self.message);
        let json = match self.structure() {
            Some(structure) => serde_json::to_string_pretty(structure),
            None => serde_json::to_string_pretty(&serde_json::Value::Null),
        };
        println!("{}", json.context("Unable to serialize command output")?);
        Ok(())
    }
}

/// Renders one line per record, for the message part of list commands.
pub(crate) fn lines<I, F>(heading: String, items: I, mut render: F) -> String
where
    I: IntoIterator,
    F: FnMut(I::Item) -> String,
{
    let mut message = heading;
    for item in items {
        message.push_str("\n  ");
        message.push_str(&render(item));
    }
    message
}

/// Appends a parenthesized family name when there is one.
pub(crate) fn with_family(name: &str, family: &str) -> String {
    if family.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({family})")
    }
}
