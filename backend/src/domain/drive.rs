//! Placement drives: a company's recruiting event with eligibility rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CompanyId, DriveId};
use super::student::Branch;

/// Offered compensation range (CTC, in lakhs per annum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtcRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

/// A placement drive.
///
/// `company_name` is denormalised from the company at creation for
/// join-free reads and is not synced on company rename. `number_of_rounds`
/// may be widened by the application workflow when a candidate advances
/// past the stated count; it is never lowered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDrive {
    /// Drive identifier.
    pub id: DriveId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Company display name, copied at creation.
    pub company_name: String,
    /// Role title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Free-text requirements.
    pub requirements: String,
    /// Branches eligible to apply.
    pub eligible_branches: Vec<Branch>,
    /// Minimum aggregate percentage to apply.
    pub minimum_percentage: f64,
    /// Offered compensation range.
    pub ctc_range: CtcRange,
    /// Number of hiring rounds, at least one.
    pub number_of_rounds: i32,
    /// External application link, if any.
    pub application_link: Option<String>,
    /// Date the drive takes place.
    pub drive_date: DateTime<Utc>,
    /// Application deadline.
    pub last_date_to_apply: DateTime<Utc>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PlacementDrive {
    /// Whether the given branch may apply to this drive.
    pub fn accepts_branch(&self, branch: Branch) -> bool {
        self.eligible_branches.contains(&branch)
    }
}

/// Fields required to create a drive.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDrive {
    /// Owning company.
    pub company_id: CompanyId,
    /// Company display name to denormalise onto the drive.
    pub company_name: String,
    /// Role title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Free-text requirements.
    pub requirements: String,
    /// Branches eligible to apply.
    pub eligible_branches: Vec<Branch>,
    /// Minimum aggregate percentage to apply.
    pub minimum_percentage: f64,
    /// Offered compensation range.
    pub ctc_range: CtcRange,
    /// Number of hiring rounds, at least one.
    pub number_of_rounds: i32,
    /// External application link, if any.
    pub application_link: Option<String>,
    /// Date the drive takes place.
    pub drive_date: DateTime<Utc>,
    /// Application deadline.
    pub last_date_to_apply: DateTime<Utc>,
}

/// Fields a drive update may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveUpdate {
    /// New denormalised company name, if changing.
    pub company_name: Option<String>,
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New requirements, if changing.
    pub requirements: Option<String>,
    /// New eligible branch set, if changing.
    pub eligible_branches: Option<Vec<Branch>>,
    /// New minimum percentage, if changing.
    pub minimum_percentage: Option<f64>,
    /// New compensation range, if changing.
    pub ctc_range: Option<CtcRange>,
    /// New round count, if changing.
    pub number_of_rounds: Option<i32>,
    /// New application link, if changing.
    pub application_link: Option<String>,
    /// New drive date, if changing.
    pub drive_date: Option<DateTime<Utc>>,
    /// New application deadline, if changing.
    pub last_date_to_apply: Option<DateTime<Utc>>,
}
