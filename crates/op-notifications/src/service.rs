//! Notification Service

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use op_core::config::NotificationConfig;
use op_core::error::OpError;
use op_core::traits::Id;
use op_db::RepositoryError;
use op_journals::Journal;
use op_models::WorkPackage;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::notification::Notification;
use crate::recipients::RecipientResolver;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Work package has not been saved")]
    Unsaved,
}

impl From<NotificationError> for OpError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::Repository(e) => e.into(),
            other => OpError::Internal(other.to_string()),
        }
    }
}

pub type NotificationResult<T> = Result<T, NotificationError>;

/// Notification persistence
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create(&self, notification: Notification) -> NotificationResult<Notification>;

    async fn for_recipient(&self, user_id: Id, unread_only: bool) -> NotificationResult<Vec<Notification>>;

    async fn for_work_package(&self, work_package_id: Id) -> NotificationResult<Vec<Notification>>;

    async fn mark_all_read(&self, user_id: Id) -> NotificationResult<usize>;
}

/// In-memory notification store
pub struct MemoryNotificationStore {
    notifications: RwLock<Vec<Notification>>,
    next_id: AtomicI64,
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, mut notification: Notification) -> NotificationResult<Notification> {
        notification.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }

    async fn for_recipient(&self, user_id: Id, unread_only: bool) -> NotificationResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| n.recipient_id == user_id)
            .filter(|n| !unread_only || n.is_unread())
            .cloned()
            .collect())
    }

    async fn for_work_package(&self, work_package_id: Id) -> NotificationResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| n.work_package_id == work_package_id)
            .cloned()
            .collect())
    }

    async fn mark_all_read(&self, user_id: Id) -> NotificationResult<usize> {
        let mut notifications = self.notifications.write().await;
        let mut count = 0;
        for notification in notifications.iter_mut() {
            if notification.recipient_id == user_id && notification.is_unread() {
                notification.mark_read();
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    resolver: RecipientResolver,
    store: Arc<dyn NotificationStore>,
    enabled: bool,
}

impl NotificationService {
    pub fn new(resolver: RecipientResolver, store: Arc<dyn NotificationStore>, config: &NotificationConfig) -> Self {
        Self {
            resolver,
            store,
            enabled: config.enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Store one notification per recipient of the change in `journal`.
    ///
    /// Nothing is stored when notifications are disabled.
    pub async fn notify_updated(
        &self,
        work_package: &WorkPackage,
        journal: &Journal,
    ) -> NotificationResult<Vec<Notification>> {
        if !self.enabled {
            debug!("notifications disabled");
            return Ok(Vec::new());
        }
        let work_package_id = work_package.id.ok_or(NotificationError::Unsaved)?;

        let mut created = Vec::new();
        for user in self.resolver.recipient_users(work_package).await? {
            let Some(user_id) = user.id else {
                continue;
            };
            let notification = Notification::about(work_package_id, work_package, journal, user_id);
            created.push(self.store.create(notification).await?);
        }

        info!(work_package_id, count = created.len(), "notifications created");
        Ok(created)
    }

    pub async fn for_recipient(&self, user_id: Id, unread_only: bool) -> NotificationResult<Vec<Notification>> {
        self.store.for_recipient(user_id, unread_only).await
    }

    pub async fn for_work_package(&self, work_package_id: Id) -> NotificationResult<Vec<Notification>> {
        self.store.for_work_package(work_package_id).await
    }

    pub async fn mark_all_read(&self, user_id: Id) -> NotificationResult<usize> {
        self.store.mark_all_read(user_id).await
    }
}
