//! Company reference data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CompanyId;

/// A recruiting company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company identifier.
    pub id: CompanyId,
    /// Display name. Drives copy this at creation; renames do not fan out.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Logo path or URL.
    pub logo: Option<String>,
    /// Company website.
    pub website: Option<String>,
    /// Office location.
    pub location: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a company.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Logo path or URL.
    pub logo: Option<String>,
    /// Company website.
    pub website: Option<String>,
    /// Office location.
    pub location: Option<String>,
}

/// Fields a company update may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyUpdate {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New logo, if changing.
    pub logo: Option<String>,
    /// New website, if changing.
    pub website: Option<String>,
    /// New location, if changing.
    pub location: Option<String>,
}
