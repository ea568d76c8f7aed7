use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::test::CustomTest;
use crate::error::CoreError;

/// Lifecycle of an assignment as driven by the portal: `Assigned` is the
/// initial state, `Completed` is terminal. The only transition fires inside
/// the submit workflow, after a successful result write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssignmentStatus {
    Assigned,
    Completed,
}

impl AssignmentStatus {
    /// The backend's column value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Completed => "completed",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(AssignmentStatus::Assigned),
            "completed" => Ok(AssignmentStatus::Completed),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// A clinician's directive that one patient complete one test once.
/// Created externally; the portal's only writes are the status transition
/// and completion timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assignment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub test_id: Uuid,
    pub status: AssignmentStatus,
    pub assigned_at: jiff::Timestamp,
    pub completed_at: Option<jiff::Timestamp>,
}

/// An assignment row with its test template embedded, as returned by the
/// composite load.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssignmentWithTest {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub custom_tests: CustomTest,
}
