use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Whether a volunteer has finished their task.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    #[default]
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "completed", alias = "COMPLETED", alias = "done")]
    Completed,
}

serde_plain::derive_display_from_serialize!(AssignmentStatus);
serde_plain::derive_fromstr_from_deserialize!(AssignmentStatus);

/// A volunteer task for one year's gathering.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Assignment {
    pub(crate) id: RecordId,
    pub(crate) year: i32,
    pub(crate) member: String,
    pub(crate) task: String,
    #[serde(default)]
    pub(crate) status: AssignmentStatus,
}

impl Assignment {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn status(&self) -> AssignmentStatus {
        self.status
    }
}

/// The fields of an assignment before the store has assigned it an id. New assignments always
/// start out `Pending`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub year: i32,
    pub member: String,
    pub task: String,
}

impl NewAssignment {
    pub fn new(year: i32, member: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            year,
            member: member.into(),
            task: task.into(),
        }
    }

    pub(crate) fn into_assignment(self, id: RecordId) -> Assignment {
        Assignment {
            id,
            year: self.year,
            member: self.member,
            task: self.task,
            status: AssignmentStatus::Pending,
        }
    }
}

#[test]
fn test_assignment_status_strings() {
    use std::str::FromStr;
    assert_eq!(AssignmentStatus::Completed.to_string(), "Completed");
    assert_eq!(
        AssignmentStatus::from_str("pending").unwrap(),
        AssignmentStatus::Pending
    );
    assert!(AssignmentStatus::from_str("maybe").is_err());
}
