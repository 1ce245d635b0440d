//! Authenticated user identity as seen by the domain.
//!
//! Credential issuance lives outside this service; the domain only cares
//! about who a verified caller is and which role they hold.

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Role carried by a verified bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Placement-cell administrator: full access.
    Admin,
    /// Student: access limited to their own records.
    Student,
}

impl Role {
    /// Canonical lowercase name, as stored in credentials.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            other => Err(UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error raised when a credential carries an unrecognised role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {value}")]
pub struct UnknownRole {
    /// The rejected role string.
    pub value: String,
}

/// A verified caller: user id plus role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    /// The caller's user id.
    pub user_id: UserId,
    /// The caller's role.
    pub role: Role,
}

impl Viewer {
    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
