//! Calendar events, optionally linked to a placement drive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DriveId, EventId};

/// A calendar entry.
///
/// Drive-linked events (`drive_id` set) are system managed: they are
/// created, renamed, and deleted in lockstep with their drive and must not
/// be edited or deleted through the calendar endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// Headline shown on the calendar.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Linked drive, when system managed.
    pub drive_id: Option<DriveId>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether this event is managed by a drive and closed to manual edits.
    pub fn is_drive_managed(&self) -> bool {
        self.drive_id.is_some()
    }
}

/// Fields required to create an event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    /// Headline shown on the calendar.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Linked drive, when created by drive management.
    pub drive_id: Option<DriveId>,
}

/// Fields an event update may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventUpdate {
    /// New headline, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New date, if changing.
    pub date: Option<DateTime<Utc>>,
}
