//! Shared service dependencies

use std::sync::Arc;

use op_attachments::AttachmentService;
use op_core::config::{AppConfig, DoneRatioMode};
use op_core::error::OpError;
use op_core::result::OpResult;
use op_core::traits::Id;
use op_db::Database;
use op_journals::JournalService;
use op_models::User;
use op_notifications::{MemoryNotificationStore, NotificationService, RecipientResolver};

/// Everything a work package service talks to
#[derive(Clone)]
pub struct ServiceContext {
    pub db: Arc<Database>,
    pub journals: JournalService,
    pub attachments: AttachmentService,
    pub notifications: NotificationService,
    pub config: AppConfig,
}

impl ServiceContext {
    /// Context backed by in-memory journal, attachment and notification stores
    pub fn new(db: Arc<Database>, config: AppConfig) -> Self {
        let notifications = NotificationService::new(
            RecipientResolver::new(Arc::clone(&db)),
            Arc::new(MemoryNotificationStore::new()),
            &config.notifications,
        );
        Self {
            journals: JournalService::in_memory(),
            attachments: AttachmentService::in_memory(&config.attachments),
            notifications,
            db,
            config,
        }
    }

    pub fn done_ratio_mode(&self) -> DoneRatioMode {
        self.config.work_packages.done_ratio
    }
}

/// Id of the user a service acts for
pub(crate) fn acting_user_id(user: &User) -> OpResult<Id> {
    user.id
        .ok_or_else(|| OpError::Internal(format!("user {} has not been saved", user.login)))
}
