//! Member repository
//!
//! Memberships, the roles they grant and the permission checks built on them.

use op_core::traits::Id;
use op_core::types::MailNotification;
use op_models::{Member, Project, Role, User};

use crate::repository::{MemoryTable, Repository, RepositoryResult};

pub type MemberRepository = MemoryTable<Member>;

impl MemoryTable<Member> {
    pub async fn find_by_project(&self, project_id: Id) -> Vec<Member> {
        self.filter(|m| m.project_id == project_id).await
    }

    pub async fn find_by_user(&self, user_id: Id) -> Vec<Member> {
        self.filter(|m| m.user_id == user_id).await
    }

    pub async fn find_membership(&self, user_id: Id, project_id: Id) -> Option<Member> {
        self.find_first(|m| m.user_id == user_id && m.project_id == project_id)
            .await
    }

    /// Roles `user` holds in the project; admins hold every role
    pub async fn roles_for(
        &self,
        user: &User,
        project_id: Id,
        roles: &MemoryTable<Role>,
    ) -> RepositoryResult<Vec<Role>> {
        if user.admin {
            return roles.find_all().await;
        }
        let Some(user_id) = user.id else {
            return Ok(Vec::new());
        };
        match self.find_membership(user_id, project_id).await {
            Some(member) => Ok(roles.find_by_ids(&member.role_ids).await),
            None => Ok(Vec::new()),
        }
    }

    /// Whether `user` may do `permission` in `project`.
    ///
    /// Nothing is allowed in archived projects. Admins are allowed
    /// everything else.
    pub async fn allowed_to(
        &self,
        user: &User,
        permission: &str,
        project: &Project,
        roles: &MemoryTable<Role>,
    ) -> RepositoryResult<bool> {
        if !project.active() || !user.active() {
            return Ok(false);
        }
        if user.admin {
            return Ok(true);
        }
        let Some(project_id) = project.id else {
            return Ok(false);
        };
        let held = self.roles_for(user, project_id, roles).await?;
        Ok(held.iter().any(|r| r.has_permission(permission)))
    }

    /// Members who get mails about everything in the project: users with
    /// the `all` option or with the project selected on their membership
    pub async fn project_recipients(
        &self,
        project_id: Id,
        users: &MemoryTable<User>,
    ) -> RepositoryResult<Vec<User>> {
        let mut recipients = Vec::new();
        for member in self.find_by_project(project_id).await {
            let Some(user) = users.find_by_id(member.user_id).await? else {
                continue;
            };
            let wants_all = user.mail_notification == MailNotification::All;
            if user.active() && (wants_all || member.mail_notification) {
                recipients.push(user);
            }
        }
        Ok(recipients)
    }
}
