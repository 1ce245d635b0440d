//! Notification fan-out service.
//!
//! Audiences are stored as a [`RecipientSpec`](crate::domain::notification::RecipientSpec)
//! and resolved lazily against the requesting viewer, so placement changes
//! retarget the placed/unplaced groups without rewriting stored rows.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::ids::NotificationId;
use super::notification::{Notification, NotificationDraft};
use super::ports::{NotificationFanout, NotificationRepository, StudentRepository};
use super::student::Student;
use super::user::Viewer;

/// Concrete implementation of [`NotificationFanout`].
pub struct NotificationService<N, S> {
    notifications: Arc<N>,
    students: Arc<S>,
}

impl<N, S> NotificationService<N, S> {
    /// Create a new notification service over its ports.
    pub fn new(notifications: Arc<N>, students: Arc<S>) -> Self {
        Self {
            notifications,
            students,
        }
    }
}

impl<N, S> NotificationService<N, S>
where
    N: NotificationRepository,
    S: StudentRepository,
{
    /// Resolve the student profile behind a viewer, if any.
    ///
    /// Admins have no profile; a student whose profile row is missing still
    /// receives `all`-group notifications, so a `None` here is not an error.
    async fn viewer_profile(&self, viewer: &Viewer) -> Result<Option<Student>, Error> {
        if viewer.is_admin() {
            return Ok(None);
        }
        Ok(self.students.find_by_user(viewer.user_id).await?)
    }

    async fn audience_for(&self, viewer: Viewer) -> Result<Vec<Notification>, Error> {
        let student = self.viewer_profile(&viewer).await?;
        let all = self.notifications.list().await?;
        Ok(all
            .into_iter()
            .filter(|n| n.audience_includes(&viewer, student.as_ref()))
            .collect())
    }
}

#[async_trait]
impl<N, S> NotificationFanout for NotificationService<N, S>
where
    N: NotificationRepository,
    S: StudentRepository,
{
    async fn list_for(&self, viewer: Viewer) -> Result<Vec<Notification>, Error> {
        self.audience_for(viewer).await
    }

    async fn create(&self, draft: NotificationDraft) -> Result<Notification, Error> {
        Ok(self.notifications.insert(draft).await?)
    }

    /// Audience membership gates the write: a student marking a
    /// notification outside their resolved audience gets not-found, the
    /// same answer as for an id that does not exist.
    async fn mark_read(&self, id: NotificationId, viewer: Viewer) -> Result<Notification, Error> {
        let notification = self
            .notifications
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found("Notification not found"))?;
        let student = self.viewer_profile(&viewer).await?;
        if !notification.audience_includes(&viewer, student.as_ref()) {
            return Err(Error::not_found("Notification not found"));
        }
        self.notifications
            .mark_read(id, viewer.user_id)
            .await?
            .ok_or_else(|| Error::not_found("Notification not found"))
    }

    async fn mark_all_read(&self, viewer: Viewer) -> Result<u64, Error> {
        let user_id = viewer.user_id;
        let audience = self.audience_for(viewer).await?;
        let mut marked = 0u64;
        for notification in audience {
            if notification.is_read_by(user_id) {
                continue;
            }
            let updated = self.notifications.mark_read(notification.id, user_id).await?;
            // Deleted mid-iteration: nothing to count.
            if updated.is_some() {
                marked += 1;
            }
        }
        Ok(marked)
    }

    async fn delete(&self, id: NotificationId) -> Result<(), Error> {
        if self.notifications.delete(id).await? {
            Ok(())
        } else {
            Err(Error::not_found("Notification not found"))
        }
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
