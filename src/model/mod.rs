//! Types that represent the core data model, such as `Donation` and `Expense`.
mod amount;
mod assignment;
mod attendance;
mod dataset;
mod date;
mod donation;
mod expense;
mod id;
mod stats;
mod year;

pub use amount::{Amount, AmountError};
pub use assignment::{Assignment, AssignmentStatus, NewAssignment};
pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceUpdate, NewAttendance};
pub use dataset::Dataset;
pub use date::parse_date;
pub use donation::{Donation, NewDonation};
pub use expense::{Expense, NewExpense};
pub use id::RecordId;
pub(crate) use id::IdGenerator;
pub use stats::{AttendanceSummary, CategoryTotals, Stats};
pub use year::YearFilter;
