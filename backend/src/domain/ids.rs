//! Typed identifiers for domain entities.
//!
//! Every entity id is a UUID wrapped in its own newtype so a drive id can
//! never be passed where a student id is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(Self(value.parse()?))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifier of an authenticated portal user (admin or student login).
    UserId
);
define_id!(
    /// Identifier of a student profile.
    StudentId
);
define_id!(
    /// Identifier of a company.
    CompanyId
);
define_id!(
    /// Identifier of a placement drive.
    DriveId
);
define_id!(
    /// Identifier of an application (one student, one drive).
    ApplicationId
);
define_id!(
    /// Identifier of a notification.
    NotificationId
);
define_id!(
    /// Identifier of a calendar event.
    EventId
);
define_id!(
    /// Identifier of a resume score record.
    ResumeScoreId
);
