//! Student profile and placement state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{StudentId, UserId};

/// Academic branch a student belongs to and a drive may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    /// Computer Science and Engineering.
    Cse,
    /// Information Technology.
    It,
    /// Electronics and Communication Engineering.
    Ece,
    /// Electrical and Electronics Engineering.
    Eee,
    /// Mechanical Engineering.
    Mech,
    /// Civil Engineering.
    Civil,
}

impl Branch {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cse => "cse",
            Self::It => "it",
            Self::Ece => "ece",
            Self::Eee => "eee",
            Self::Mech => "mech",
            Self::Civil => "civil",
        }
    }
}

impl std::str::FromStr for Branch {
    type Err = UnknownBranch;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cse" => Ok(Self::Cse),
            "it" => Ok(Self::It),
            "ece" => Ok(Self::Ece),
            "eee" => Ok(Self::Eee),
            "mech" => Ok(Self::Mech),
            "civil" => Ok(Self::Civil),
            other => Err(UnknownBranch {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error raised for a branch name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown branch: {value}")]
pub struct UnknownBranch {
    /// The rejected branch string.
    pub value: String,
}

/// A student profile with its derived placement state.
///
/// ## Invariants
/// - `is_placed` is true exactly when `placed_companies` is non-empty.
/// - `placed_companies` holds no duplicate company names.
/// - `selected_count` never goes below zero.
///
/// Placement fields are only mutated through [`Student::record_selection`]
/// and [`Student::revoke_selection`], which the workflow commit applies
/// inside its transaction. Profile updates never touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Profile identifier.
    pub id: StudentId,
    /// Linked login user.
    pub user_id: UserId,
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Unique roll number.
    pub roll_number: String,
    /// Contact number.
    pub mobile_number: String,
    /// Academic branch.
    pub branch: Branch,
    /// Aggregate percentage, 0–100.
    pub percentage: f64,
    /// Stored resume path, used as the default on applications.
    pub resume: Option<String>,
    /// Whether the student currently holds at least one offer.
    pub is_placed: bool,
    /// Companies the student currently holds offers from, in selection order.
    pub placed_companies: Vec<String>,
    /// Number of times the student has been selected, floored at zero.
    pub selected_count: i32,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Record a selection by the named company.
    ///
    /// The company list gains the name at most once, so re-selecting within
    /// the same drive cannot double-add it; the counter always increments.
    pub fn record_selection(&mut self, company_name: &str) {
        if !self.placed_companies.iter().any(|c| c == company_name) {
            self.placed_companies.push(company_name.to_owned());
        }
        self.selected_count += 1;
        self.is_placed = true;
    }

    /// Revoke a previously recorded selection by the named company.
    ///
    /// Removes the company name if present, decrements the counter floored
    /// at zero, and clears `is_placed` once the list is empty.
    pub fn revoke_selection(&mut self, company_name: &str) {
        self.placed_companies.retain(|c| c != company_name);
        self.selected_count = (self.selected_count - 1).max(0);
        self.is_placed = !self.placed_companies.is_empty();
    }
}

/// Fields required to create a student profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    /// Linked login user.
    pub user_id: UserId,
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Unique roll number.
    pub roll_number: String,
    /// Contact number.
    pub mobile_number: String,
    /// Academic branch.
    pub branch: Branch,
    /// Aggregate percentage, 0–100.
    pub percentage: f64,
    /// Stored resume path, if any.
    pub resume: Option<String>,
}

/// Identity fields a profile update may change.
///
/// Placement state is deliberately absent: it is owned by the application
/// workflow and cannot be written through profile updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentProfileUpdate {
    /// New full name, if changing.
    pub name: Option<String>,
    /// New email address, if changing.
    pub email: Option<String>,
    /// New roll number, if changing.
    pub roll_number: Option<String>,
    /// New contact number, if changing.
    pub mobile_number: Option<String>,
    /// New academic branch, if changing.
    pub branch: Option<Branch>,
    /// New aggregate percentage, if changing.
    pub percentage: Option<f64>,
    /// New resume path, if changing.
    pub resume: Option<String>,
}
