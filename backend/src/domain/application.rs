//! Applications: one student's candidacy for one drive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ApplicationId, DriveId, StudentId};

/// Application workflow status.
///
/// The canonical set; there is no `placed` application status ("placed" is
/// a derived student flag, not a per-application state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, awaiting screening.
    Applied,
    /// Advanced past screening, awaiting a further round.
    Shortlisted,
    /// Out of the running for this drive.
    Rejected,
    /// Currently holds an offer from this drive (reversible).
    Selected,
}

impl ApplicationStatus {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Selected => "selected",
        }
    }

    /// Whether round progress is meaningful for this status.
    pub fn progressable(self) -> bool {
        matches!(self, Self::Shortlisted | Self::Selected)
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "applied" => Ok(Self::Applied),
            "shortlisted" => Ok(Self::Shortlisted),
            "rejected" => Ok(Self::Rejected),
            "selected" => Ok(Self::Selected),
            other => Err(UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error raised for a status outside the canonical set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {value}")]
pub struct UnknownStatus {
    /// The rejected status string.
    pub value: String,
}

/// One student's candidacy for one drive.
///
/// ## Invariants
/// - `(student_id, drive_id)` is unique; both are immutable after creation.
/// - `current_round` is a non-negative integer.
/// - Once `is_present` is false the application is frozen: status and round
///   mutations are refused until presence is restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Application identifier.
    pub id: ApplicationId,
    /// Applying student.
    pub student_id: StudentId,
    /// Target drive.
    pub drive_id: DriveId,
    /// Workflow status.
    pub status: ApplicationStatus,
    /// Resume attached to this application, if any.
    pub resume_url: Option<String>,
    /// Whether the student attended; false freezes the application.
    pub is_present: bool,
    /// Current round the candidate has reached, starting at zero.
    pub current_round: i32,
    /// Scheduled date of the next round, when shortlisted.
    pub next_round_date: Option<DateTime<Utc>>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp; doubles as the optimistic concurrency
    /// token for workflow commits.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an application.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    /// Applying student.
    pub student_id: StudentId,
    /// Target drive.
    pub drive_id: DriveId,
    /// Resume attached to this application, if any.
    pub resume_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_canonical_names() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Rejected,
            ApplicationStatus::Selected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
    }

    #[test]
    fn placed_is_not_an_application_status() {
        assert!("placed".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn only_shortlisted_and_selected_are_progressable() {
        assert!(ApplicationStatus::Shortlisted.progressable());
        assert!(ApplicationStatus::Selected.progressable());
        assert!(!ApplicationStatus::Applied.progressable());
        assert!(!ApplicationStatus::Rejected.progressable());
    }
}
