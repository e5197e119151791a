//! In-memory notification centre with time-based expiry.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::Notification;
use crate::domain::foundation::{NotificationId, Timestamp};
use crate::ports::NotificationSink;

/// Default lifetime of a notification.
pub const DEFAULT_TTL_MS: u64 = 5_000;

/// Append-only list of notifications; entries vanish `ttl_ms` after creation.
///
/// Expired entries are dropped on every push and read; there is no
/// background task.
#[derive(Debug, Clone)]
pub struct InMemoryNotificationCenter {
    entries: Arc<RwLock<Vec<Notification>>>,
    ttl_ms: u64,
}

impl InMemoryNotificationCenter {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            ttl_ms,
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Drops entries expired at `now`; returns how many were removed.
    pub async fn prune_expired(&self, now: &Timestamp) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|n| !n.is_expired(now, self.ttl_ms));
        before - entries.len()
    }

    /// Notifications visible at `now`, oldest first.
    pub async fn active_at(&self, now: &Timestamp) -> Vec<Notification> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|n| !n.is_expired(now, self.ttl_ms))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryNotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationCenter {
    async fn push(&self, notification: Notification) {
        tracing::debug!(
            kind = %notification.kind,
            message = %notification.message,
            "notification pushed"
        );
        let now = Timestamp::now();
        let mut entries = self.entries.write().await;
        entries.retain(|n| !n.is_expired(&now, self.ttl_ms));
        entries.push(notification);
    }

    async fn dismiss(&self, id: &NotificationId) -> bool {
        let now = Timestamp::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|n| &n.id != id || n.is_expired(&now, self.ttl_ms));
        entries.len() < before
    }

    async fn active(&self) -> Vec<Notification> {
        let now = Timestamp::now();
        self.prune_expired(&now).await;
        self.active_at(&now).await
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
