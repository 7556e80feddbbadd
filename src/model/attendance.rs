use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Whether an invitee has confirmed they will attend.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    #[serde(alias = "coming", alias = "COMING")]
    Coming,
    #[serde(
        rename = "Not Coming",
        alias = "not coming",
        alias = "not-coming",
        alias = "not_coming",
        alias = "NotComing"
    )]
    NotComing,
}

serde_plain::derive_display_from_serialize!(AttendanceStatus);
serde_plain::derive_fromstr_from_deserialize!(AttendanceStatus);

/// An expected attendee, or household, with the number of people they are bringing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceRecord {
    pub(crate) id: RecordId,
    pub(crate) year: i32,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) family: String,
    /// Expected headcount.
    pub(crate) pax: u32,
    #[serde(default)]
    pub(crate) status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn pax(&self) -> u32 {
        self.pax
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// Merges the fields that are `Some` in `update` into this record.
    pub(crate) fn apply(&mut self, update: &AttendanceUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(pax) = update.pax {
            self.pax = pax;
        }
        if let Some(family) = &update.family {
            self.family = family.clone();
        }
    }
}

/// The fields of an attendance record before the store has assigned it an id. New records always
/// start out `Coming`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub year: i32,
    pub name: String,
    #[serde(default)]
    pub family: String,
    pub pax: u32,
}

impl NewAttendance {
    pub fn new(year: i32, name: impl Into<String>, family: impl Into<String>, pax: u32) -> Self {
        Self {
            year,
            name: name.into(),
            family: family.into(),
            pax,
        }
    }

    pub(crate) fn into_record(self, id: RecordId) -> AttendanceRecord {
        AttendanceRecord {
            id,
            year: self.year,
            name: self.name,
            family: self.family,
            pax: self.pax,
            status: AttendanceStatus::Coming,
        }
    }
}

/// A partial attendance record. Only the fields that are `Some` are changed.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pax: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl AttendanceUpdate {
    pub fn status(status: AttendanceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.pax.is_none() && self.family.is_none()
    }
}
