//! Recipient resolution

use std::sync::Arc;

use op_db::{Database, Repository};
use op_models::{permissions, User, WorkPackage};
use tracing::debug;

use crate::service::NotificationResult;

/// Resolves who is told about changes to a work package
#[derive(Clone)]
pub struct RecipientResolver {
    db: Arc<Database>,
}

impl RecipientResolver {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Users to notify, each once.
    ///
    /// Project members who want every mail come first, then the author and
    /// the assignee when their own notification option allows it. Users who
    /// cannot see work packages of the project are dropped.
    pub async fn recipient_users(&self, work_package: &WorkPackage) -> NotificationResult<Vec<User>> {
        let project = self.db.projects.get(work_package.project_id).await?;
        let mut candidates = self
            .db
            .members
            .project_recipients(work_package.project_id, &self.db.users)
            .await?;

        for id in [Some(work_package.author_id), work_package.assigned_to_id].into_iter().flatten() {
            if let Some(user) = self.db.users.find_by_id(id).await? {
                if user.active() && user.notify_about(work_package) {
                    candidates.push(user);
                }
            }
        }

        let mut recipients: Vec<User> = Vec::with_capacity(candidates.len());
        for user in candidates {
            if recipients.iter().any(|r| r.id == user.id) {
                continue;
            }
            let visible = self
                .db
                .members
                .allowed_to(&user, permissions::VIEW_WORK_PACKAGES, &project, &self.db.roles)
                .await?;
            if visible {
                recipients.push(user);
            }
        }

        debug!(work_package_id = ?work_package.id, count = recipients.len(), "recipients resolved");
        Ok(recipients)
    }

    /// Mail addresses of the recipients
    pub async fn recipients(&self, work_package: &WorkPackage) -> NotificationResult<Vec<String>> {
        Ok(self
            .recipient_users(work_package)
            .await?
            .into_iter()
            .map(|u| u.mail)
            .collect())
    }
}
