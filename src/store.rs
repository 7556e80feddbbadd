//! The `Store` owns the ledger dataset and is the only thing that reads or writes it.
//!
//! Every mutation is write-through: the whole document is serialized and handed to the `Storage`
//! before the call returns. If that fails, the in-memory change is undone and the error is
//! returned, so what is in memory always matches what was last persisted.
//!
//! Two processes writing the same document are not coordinated; the last save wins.

use crate::error::LedgerError;
use crate::model::{
    Amount, Assignment, AttendanceRecord, AttendanceSummary, AttendanceUpdate, Dataset, Donation,
    Expense, IdGenerator, NewAssignment, NewAttendance, NewDonation, NewExpense, RecordId, Stats,
    YearFilter,
};
use crate::seed::seed_dataset;
use crate::storage::Storage;
use crate::Result;
use anyhow::Context;
use chrono::{Datelike, Local};
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use tracing::{debug, info, trace, warn};

/// The range accepted for explicitly entered years.
const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// Controls how a `Store` is opened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StoreOptions {
    seed: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { seed: true }
    }
}

impl StoreOptions {
    /// When `seed` is true (the default), a brand-new or unreadable ledger starts out with the
    /// demonstration data. Otherwise it starts out empty.
    pub fn with_seed(seed: bool) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> bool {
        self.seed
    }

    fn initial_dataset(&self) -> Dataset {
        if self.seed {
            seed_dataset()
        } else {
            Dataset::default()
        }
    }
}

pub struct Store {
    storage: Box<dyn Storage>,
    data: Dataset,
    ids: IdGenerator,
    corruption: Option<LedgerError>,
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("data", &self.data)
            .field("ids", &self.ids)
            .field("corruption", &self.corruption)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Loads the dataset from `storage`.
    ///
    /// - If nothing is stored yet, the initial dataset (see `StoreOptions`) is installed and
    ///   persisted.
    /// - If the stored document cannot be parsed, the problem is logged, a copy of the document is
    ///   kept via `Storage::preserve_corrupt`, and the initial dataset replaces it. The problem is
    ///   available afterwards from `Store::corruption`.
    ///
    /// # Errors
    /// - Returns an error if the storage cannot be read or written.
    /// - Returns an error if a corrupt document could not be preserved; in that case nothing is
    ///   overwritten.
    pub async fn open(storage: impl Storage + 'static, options: StoreOptions) -> Result<Self> {
        let storage: Box<dyn Storage> = Box::new(storage);
        let (data, corruption, install) = match storage.load().await? {
            None => {
                info!("No ledger document found, starting a new one");
                (options.initial_dataset(), None, true)
            }
            Some(text) => match Dataset::from_json(&text) {
                Ok(data) => (data, None, false),
                Err(e) => {
                    let err = LedgerError::CorruptState(e.to_string());
                    warn!("{err}. Starting over with a new ledger");
                    let copy = storage
                        .preserve_corrupt(&text)
                        .await
                        .context("Unable to keep a copy of the corrupt ledger document")?;
                    if let Some(path) = copy {
                        warn!("The corrupt document was saved to {}", path.display());
                    }
                    (options.initial_dataset(), Some(err), true)
                }
            },
        };

        let store = Self {
            storage,
            ids: IdGenerator::after(data.max_id()),
            data,
            corruption,
        };
        if install {
            if options.seed {
                info!("Installing the demonstration data");
            }
            store.persist().await?;
        }
        Ok(store)
    }

    /// The problem found with the stored document when the store was opened, if any.
    pub fn corruption(&self) -> Option<&LedgerError> {
        self.corruption.as_ref()
    }

    /// The raw dataset, in storage order.
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Every year that is registered or that has a donation or expense, most recent first. When
    /// there are none at all, the current year is returned on its own.
    pub fn years(&self) -> Vec<i32> {
        let mut years: BTreeSet<i32> = self.data.years.iter().copied().collect();
        years.extend(self.data.donations.iter().map(Donation::year));
        years.extend(self.data.expenses.iter().map(Expense::year));
        if years.is_empty() {
            years.insert(Local::now().year());
        }
        years.into_iter().rev().collect()
    }

    /// Registers `year`. Returns `false` if it was already registered, in which case nothing is
    /// written.
    pub async fn add_year(&mut self, year: i32) -> Result<bool> {
        trace!("add_year {year}");
        validate_year("year", year)?;
        if self.data.years.contains(&year) {
            return Ok(false);
        }
        self.data.years.push(year);
        self.commit(|data| {
            data.years.pop();
        })
        .await?;
        Ok(true)
    }

    /// Donations dated in `year`, most recent first. Donations on the same date keep the order in
    /// which they were added.
    pub fn donations(&self, year: YearFilter) -> Vec<Donation> {
        let mut donations: Vec<Donation> = self
            .data
            .donations
            .iter()
            .filter(|d| year.matches(d.year()))
            .cloned()
            .collect();
        donations.sort_by(|a, b| b.date().cmp(&a.date()));
        donations
    }

    /// Expenses dated in `year`, most recent first. Expenses on the same date keep the order in
    /// which they were added.
    pub fn expenses(&self, year: YearFilter) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .data
            .expenses
            .iter()
            .filter(|e| year.matches(e.year()))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date().cmp(&a.date()));
        expenses
    }

    /// Volunteer assignments for `year`, in the order they were added.
    pub fn assignments(&self, year: YearFilter) -> Vec<Assignment> {
        self.data
            .assignments
            .iter()
            .filter(|a| year.matches(a.year()))
            .cloned()
            .collect()
    }

    /// Attendance records for `year`, in the order they were added.
    pub fn attendance(&self, year: YearFilter) -> Vec<AttendanceRecord> {
        self.data
            .attendance
            .iter()
            .filter(|a| year.matches(a.year()))
            .cloned()
            .collect()
    }

    /// Totals, balance and per-category expense sums for `year`. Categories appear in the order
    /// they are first met in the expense list (most recent first).
    pub fn stats(&self, year: YearFilter) -> Stats {
        let donations = self.donations(year);
        let expenses = self.expenses(year);
        Stats::compute(year, &donations, &expenses)
    }

    /// Headcount figures for `year`.
    pub fn attendance_summary(&self, year: YearFilter) -> AttendanceSummary {
        AttendanceSummary::compute(
            self.data
                .attendance
                .iter()
                .filter(|a| year.matches(a.year())),
        )
    }

    pub async fn add_donation(&mut self, donation: NewDonation) -> Result<Donation> {
        trace!("add_donation {donation:?}");
        validate_text("name", &donation.name)?;
        validate_amount(donation.amount)?;
        validate_total(
            "donation",
            self.data.donations.iter().map(Donation::amount),
            donation.amount,
        )?;
        let id = self.ids.next_id()?;
        let donation = donation.into_donation(id);
        self.data.donations.push(donation.clone());
        self.commit_insert(id, |data| {
            data.donations.pop();
        })
        .await?;
        Ok(donation)
    }

    pub async fn add_expense(&mut self, expense: NewExpense) -> Result<Expense> {
        trace!("add_expense {expense:?}");
        validate_text("category", &expense.category)?;
        validate_amount(expense.amount)?;
        validate_total(
            "expense",
            self.data.expenses.iter().map(Expense::amount),
            expense.amount,
        )?;
        let id = self.ids.next_id()?;
        let expense = expense.into_expense(id);
        self.data.expenses.push(expense.clone());
        self.commit_insert(id, |data| {
            data.expenses.pop();
        })
        .await?;
        Ok(expense)
    }

    /// Adds a volunteer assignment. It always starts out `Pending`.
    pub async fn add_assignment(&mut self, assignment: NewAssignment) -> Result<Assignment> {
        trace!("add_assignment {assignment:?}");
        validate_year("year", assignment.year)?;
        validate_text("member", &assignment.member)?;
        validate_text("task", &assignment.task)?;
        let id = self.ids.next_id()?;
        let assignment = assignment.into_assignment(id);
        self.data.assignments.push(assignment.clone());
        self.commit_insert(id, |data| {
            data.assignments.pop();
        })
        .await?;
        Ok(assignment)
    }

    /// Adds an attendance record. It always starts out `Coming`.
    pub async fn add_attendance(&mut self, attendance: NewAttendance) -> Result<AttendanceRecord> {
        trace!("add_attendance {attendance:?}");
        validate_year("year", attendance.year)?;
        validate_text("name", &attendance.name)?;
        let id = self.ids.next_id()?;
        let record = attendance.into_record(id);
        self.data.attendance.push(record.clone());
        self.commit_insert(id, |data| {
            data.attendance.pop();
        })
        .await?;
        Ok(record)
    }

    /// Merges `update` into the attendance record with `id`. Returns `Ok(None)` when there is no
    /// such record, in which case nothing is written.
    pub async fn update_attendance(
        &mut self,
        id: RecordId,
        update: AttendanceUpdate,
    ) -> Result<Option<AttendanceRecord>> {
        trace!("update_attendance {id} {update:?}");
        let Some(ix) = self.data.attendance.iter().position(|a| a.id() == id) else {
            debug!("No attendance record with id {id}");
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(self.data.attendance[ix].clone()));
        }
        let previous = self.data.attendance[ix].clone();
        self.data.attendance[ix].apply(&update);
        self.commit(move |data| data.attendance[ix] = previous)
            .await?;
        Ok(Some(self.data.attendance[ix].clone()))
    }

    /// Writes the whole dataset to storage.
    async fn persist(&self) -> Result<()> {
        let json = self
            .data
            .to_json()
            .context("Unable to serialize the ledger")?;
        self.storage
            .save(&json)
            .await
            .context("Unable to save the ledger")?;
        debug!("Ledger saved");
        Ok(())
    }

    /// Persists, or runs `undo` on the dataset if persisting fails.
    async fn commit(&mut self, undo: impl FnOnce(&mut Dataset)) -> Result<()> {
        if let Err(e) = self.persist().await {
            undo(&mut self.data);
            return Err(e);
        }
        Ok(())
    }

    /// Like `commit`, and also hands `id` back to the generator on failure.
    async fn commit_insert(&mut self, id: RecordId, undo: impl FnOnce(&mut Dataset)) -> Result<()> {
        let result = self.commit(undo).await;
        if result.is_err() {
            self.ids.release(id);
        }
        result
    }
}

fn validate_text(field: &'static str, value: &str) -> std::result::Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(field, "must not be blank"));
    }
    Ok(())
}

fn validate_amount(amount: Amount) -> std::result::Result<(), LedgerError> {
    if amount.is_negative() {
        return Err(LedgerError::validation(
            "amount",
            format!("must not be negative, got {}", amount.value()),
        ));
    }
    Ok(())
}

/// Refuses an amount that would push the total over every year out of range, so that stats can
/// always be computed exactly.
fn validate_total(
    kind: &str,
    existing: impl IntoIterator<Item = Amount>,
    amount: Amount,
) -> std::result::Result<(), LedgerError> {
    let fits = Amount::checked_sum(existing)
        .and_then(|total| total.checked_add(amount))
        .is_some();
    if !fits {
        return Err(LedgerError::validation(
            "amount",
            format!("{} would make the {kind} total too large", amount.value()),
        ));
    }
    Ok(())
}

fn validate_year(field: &'static str, year: i32) -> std::result::Result<(), LedgerError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(LedgerError::validation(
            field,
            format!("expected a 4-digit year, got {year}"),
        ));
    }
    Ok(())
}
