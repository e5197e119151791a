//! Notification Sink Port - Where transient user messages go.

use async_trait::async_trait;

use crate::domain::booking::Notification;
use crate::domain::foundation::NotificationId;

/// Port for transient notifications.
///
/// Sinks expire entries on their own after a fixed delay; `active` never
/// returns expired entries.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn push(&self, notification: Notification);

    /// Removes one notification. Returns false if it was unknown or expired.
    async fn dismiss(&self, id: &NotificationId) -> bool;

    /// Notifications still visible, oldest first.
    async fn active(&self) -> Vec<Notification>;

    async fn clear(&self);
}
