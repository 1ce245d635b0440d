//! Driving port for notification fan-out and read tracking.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ids::NotificationId;
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::user::Viewer;

/// Use-case surface for notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationFanout: Send + Sync {
    /// List the viewer's notifications, newest first.
    ///
    /// Admins see everything; students see their resolved audience.
    async fn list_for(&self, viewer: Viewer) -> Result<Vec<Notification>, Error>;

    /// Create a notification; the audience resolves lazily at read time.
    async fn create(&self, draft: NotificationDraft) -> Result<Notification, Error>;

    /// Record that the viewer has read the notification (idempotent).
    async fn mark_read(
        &self,
        id: NotificationId,
        viewer: Viewer,
    ) -> Result<Notification, Error>;

    /// Mark every notification in the viewer's audience as read. Returns
    /// how many notifications were newly marked.
    async fn mark_all_read(&self, viewer: Viewer) -> Result<u64, Error>;

    /// Delete a notification.
    async fn delete(&self, id: NotificationId) -> Result<(), Error>;
}
