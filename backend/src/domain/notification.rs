//! Notifications and their audience rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{NotificationId, StudentId, UserId};
use super::student::Student;
use super::user::Viewer;

/// Who a notification addresses.
///
/// Resolution is lazy: the recipient value is stored verbatim and
/// evaluated against the requesting user at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipientSpec {
    /// A broadcast group.
    Group(RecipientGroup),
    /// An explicit list of student ids.
    Students(Vec<StudentId>),
}

/// Broadcast recipient groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientGroup {
    /// Every user.
    All,
    /// Students currently holding an offer.
    Placed,
    /// Students not currently holding an offer.
    Unplaced,
}

/// A notification with per-user read state.
///
/// `read_by` is an append-only set of **user** ids; membership is what
/// matters, insertion order does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification identifier.
    pub id: NotificationId,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Addressed audience, resolved lazily at read time.
    pub recipients: RecipientSpec,
    /// User ids that have viewed this notification.
    pub read_by: Vec<UserId>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the given viewer is in this notification's audience.
    ///
    /// Admins see everything. A student qualifies through `all`, through
    /// the placed/unplaced groups depending on their placement flag, or by
    /// appearing in an explicit recipient list.
    pub fn audience_includes(&self, viewer: &Viewer, student: Option<&Student>) -> bool {
        if viewer.is_admin() {
            return true;
        }
        match &self.recipients {
            RecipientSpec::Group(RecipientGroup::All) => true,
            RecipientSpec::Group(RecipientGroup::Placed) => {
                student.is_some_and(|s| s.is_placed)
            }
            RecipientSpec::Group(RecipientGroup::Unplaced) => {
                student.is_some_and(|s| !s.is_placed)
            }
            RecipientSpec::Students(ids) => student.is_some_and(|s| ids.contains(&s.id)),
        }
    }

    /// Record that the given user has viewed this notification.
    ///
    /// Appends the id at most once; returns whether the set changed.
    pub fn mark_read(&mut self, user_id: UserId) -> bool {
        if self.read_by.contains(&user_id) {
            return false;
        }
        self.read_by.push(user_id);
        true
    }

    /// Whether the given user has viewed this notification.
    pub fn is_read_by(&self, user_id: UserId) -> bool {
        self.read_by.contains(&user_id)
    }
}

/// Fields required to create a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Addressed audience.
    pub recipients: RecipientSpec,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::Branch;
    use crate::domain::user::Role;
    use rstest::rstest;

    fn student(placed: bool) -> Student {
        Student {
            id: StudentId::random(),
            user_id: UserId::random(),
            name: "Asha Rao".to_owned(),
            email: "asha@example.edu".to_owned(),
            roll_number: "CS21B001".to_owned(),
            mobile_number: "9876543210".to_owned(),
            branch: Branch::Cse,
            percentage: 81.5,
            resume: None,
            is_placed: placed,
            placed_companies: if placed { vec!["Acme".to_owned()] } else { Vec::new() },
            selected_count: i32::from(placed),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn notification(recipients: RecipientSpec) -> Notification {
        Notification {
            id: NotificationId::random(),
            title: "t".to_owned(),
            message: "m".to_owned(),
            recipients,
            read_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(RecipientGroup::All, false, true)]
    #[case(RecipientGroup::All, true, true)]
    #[case(RecipientGroup::Placed, true, true)]
    #[case(RecipientGroup::Placed, false, false)]
    #[case(RecipientGroup::Unplaced, false, true)]
    #[case(RecipientGroup::Unplaced, true, false)]
    fn group_audience_follows_placement_flag(
        #[case] group: RecipientGroup,
        #[case] placed: bool,
        #[case] expected: bool,
    ) {
        let s = student(placed);
        let viewer = Viewer {
            user_id: s.user_id,
            role: Role::Student,
        };
        let n = notification(RecipientSpec::Group(group));
        assert_eq!(n.audience_includes(&viewer, Some(&s)), expected);
    }

    #[test]
    fn explicit_list_matches_student_id() {
        let s = student(false);
        let viewer = Viewer {
            user_id: s.user_id,
            role: Role::Student,
        };
        let addressed = notification(RecipientSpec::Students(vec![s.id]));
        let other = notification(RecipientSpec::Students(vec![StudentId::random()]));
        assert!(addressed.audience_includes(&viewer, Some(&s)));
        assert!(!other.audience_includes(&viewer, Some(&s)));
    }

    #[test]
    fn admin_sees_everything() {
        let viewer = Viewer {
            user_id: UserId::random(),
            role: Role::Admin,
        };
        let n = notification(RecipientSpec::Students(vec![StudentId::random()]));
        assert!(n.audience_includes(&viewer, None));
    }

    #[test]
    fn mark_read_is_idempotent() {
        let user = UserId::random();
        let mut n = notification(RecipientSpec::Group(RecipientGroup::All));
        assert!(n.mark_read(user));
        assert!(!n.mark_read(user));
        assert_eq!(n.read_by, vec![user]);
    }
}
