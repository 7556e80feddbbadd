//! These structs provide the CLI interface for the ledger CLI.

use crate::model::{Amount, AttendanceStatus, RecordId, YearFilter};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// ledger: keeps the books for a yearly community gathering.
///
/// Donations, expenses, volunteer assignments and attendance are kept in a single JSON document
/// in the ledger home directory. Every change is written to disk immediately.
///
/// Start with `ledger init`. The first time the ledger is opened it is filled with
/// demonstration data covering three past years, unless `seed_demo_data` is set to false in
/// config.json.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the ledger home directory and its configuration file.
    ///
    /// By default the directory is $HOME/ledger. Pass --ledger-home or set LEDGER_HOME to put it
    /// somewhere else.
    Init,
    /// List or register the years being tracked.
    Years(YearsArgs),
    /// List or record donations.
    Donations(DonationsArgs),
    /// List or record expenses.
    Expenses(ExpensesArgs),
    /// List or record volunteer assignments.
    Assignments(AssignmentsArgs),
    /// List, record or update attendance.
    Attendance(AttendanceArgs),
    /// Show totals, balance and expenses by category.
    Stats(StatsArgs),
    /// Write donations or expenses to a CSV file.
    Export(ExportArgs),
    /// Save a snapshot of the ledger document into the backups directory.
    Backup,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the ledger and its configuration are held. Defaults to ~/ledger
    #[arg(long, env = "LEDGER_HOME", default_value_t = default_ledger_home())]
    ledger_home: DisplayPath,

    /// Print the structured output of the command as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, ledger_home: PathBuf, json: bool) -> Self {
        Self {
            log_level,
            ledger_home: ledger_home.into(),
            json,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger_home(&self) -> &DisplayPath {
        &self.ledger_home
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `ledger years` command.
#[derive(Debug, Parser, Clone)]
pub struct YearsArgs {
    #[command(subcommand)]
    action: YearsAction,
}

impl YearsArgs {
    pub fn action(&self) -> &YearsAction {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum YearsAction {
    /// List every tracked year, most recent first.
    List,
    /// Register a year, e.g. for an upcoming gathering that has no records yet.
    Add {
        /// A 4-digit year.
        year: i32,
    },
}

/// A `--year` option that accepts a year or `all`.
#[derive(Debug, Parser, Clone, Default)]
pub struct YearOpt {
    /// The year to show, or "all".
    #[arg(long, default_value = "all")]
    year: YearFilter,
}

impl YearOpt {
    pub fn new(year: YearFilter) -> Self {
        Self { year }
    }

    pub fn year(&self) -> YearFilter {
        self.year
    }
}

/// Args for the `ledger donations` command.
#[derive(Debug, Parser, Clone)]
pub struct DonationsArgs {
    #[command(subcommand)]
    action: DonationsAction,
}

impl DonationsArgs {
    pub fn action(&self) -> &DonationsAction {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DonationsAction {
    /// List donations, most recent first.
    List(YearOpt),
    /// Record a donation.
    Add(AddDonationArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddDonationArgs {
    /// The donor's name.
    #[arg(long)]
    pub name: String,

    /// The family or household the donation is credited to.
    #[arg(long, default_value = "")]
    pub family: String,

    /// The amount donated, e.g. 5001 or 2,100.50
    #[arg(long)]
    pub amount: Amount,

    /// The date of the donation as YYYY-MM-DD. Defaults to today.
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

/// Args for the `ledger expenses` command.
#[derive(Debug, Parser, Clone)]
pub struct ExpensesArgs {
    #[command(subcommand)]
    action: ExpensesAction,
}

impl ExpensesArgs {
    pub fn action(&self) -> &ExpensesAction {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExpensesAction {
    /// List expenses, most recent first.
    List(YearOpt),
    /// Record an expense.
    Add(AddExpenseArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddExpenseArgs {
    /// The category, e.g. Food, Pooja or Travel. Categories are matched exactly (case included)
    /// when totals are computed.
    #[arg(long)]
    pub category: String,

    /// What the money was spent on.
    #[arg(long, default_value = "")]
    pub description: String,

    /// The amount spent.
    #[arg(long)]
    pub amount: Amount,

    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

/// Args for the `ledger assignments` command.
#[derive(Debug, Parser, Clone)]
pub struct AssignmentsArgs {
    #[command(subcommand)]
    action: AssignmentsAction,
}

impl AssignmentsArgs {
    pub fn action(&self) -> &AssignmentsAction {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AssignmentsAction {
    /// List volunteer assignments.
    List(YearOpt),
    /// Assign a task to a volunteer. The assignment starts out Pending.
    Add(AddAssignmentArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddAssignmentArgs {
    /// The year of the gathering.
    #[arg(long)]
    pub year: i32,

    /// The volunteer's name.
    #[arg(long)]
    pub member: String,

    /// The task.
    #[arg(long)]
    pub task: String,
}

/// Args for the `ledger attendance` command.
#[derive(Debug, Parser, Clone)]
pub struct AttendanceArgs {
    #[command(subcommand)]
    action: AttendanceAction,
}

impl AttendanceArgs {
    pub fn action(&self) -> &AttendanceAction {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AttendanceAction {
    /// List attendance records with a headcount summary.
    List(YearOpt),
    /// Add an expected attendee. The record starts out Coming.
    Add(AddAttendanceArgs),
    /// Change the status, headcount or family of an attendance record.
    Update(UpdateAttendanceArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddAttendanceArgs {
    /// The year of the gathering.
    #[arg(long)]
    pub year: i32,

    /// The attendee's name.
    #[arg(long)]
    pub name: String,

    /// The attendee's family or household.
    #[arg(long, default_value = "")]
    pub family: String,

    /// The number of people expected.
    #[arg(long)]
    pub pax: u32,
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateAttendanceArgs {
    /// The id of the attendance record.
    pub id: RecordId,

    /// "coming" or "not-coming".
    #[arg(long)]
    pub status: Option<AttendanceStatus>,

    /// The new headcount.
    #[arg(long)]
    pub pax: Option<u32>,

    /// The new family or household.
    #[arg(long)]
    pub family: Option<String>,
}

/// Args for the `ledger stats` command.
#[derive(Debug, Parser, Clone)]
pub struct StatsArgs {
    #[clap(flatten)]
    year: YearOpt,
}

impl StatsArgs {
    pub fn new(year: YearFilter) -> Self {
        Self {
            year: YearOpt::new(year),
        }
    }

    pub fn year(&self) -> YearFilter {
        self.year.year()
    }
}

/// Which list to export.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum ExportKind {
    Donations,
    Expenses,
}

/// Args for the `ledger export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// What to export.
    kind: ExportKind,

    #[clap(flatten)]
    year: YearOpt,

    /// The CSV file to write.
    #[arg(long)]
    out: PathBuf,
}

impl ExportArgs {
    pub fn new(kind: ExportKind, year: YearFilter, out: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            year: YearOpt::new(year),
            out: out.into(),
        }
    }

    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    pub fn year(&self) -> YearFilter {
        self.year.year()
    }

    pub fn out(&self) -> &Path {
        &self.out
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::model::parse_date(s).ok_or_else(|| format!("Expected a date like 2025-12-01, got '{s}'"))
}

fn default_ledger_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger-home or LEDGER_HOME instead of relying on the default \
                ledger home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
