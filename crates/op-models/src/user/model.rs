//! User record

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use op_core::types::{MailNotification, UserStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::work_package::WorkPackage;

/// User entity
///
/// Represents a user account in OpenProject.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<Id>,

    /// Login name (unique)
    #[validate(length(min = 1, max = 255))]
    pub login: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub firstname: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub lastname: String,

    /// Email address, also the notification address
    #[validate(email)]
    pub mail: String,

    /// Whether user is admin
    #[serde(default)]
    pub admin: bool,

    /// User status (active, locked, registered)
    #[serde(default)]
    pub status: UserStatus,

    /// Which events the user wants mails about
    #[serde(default)]
    pub mail_notification: MailNotification,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: None,
            login: String::new(),
            firstname: String::new(),
            lastname: String::new(),
            mail: String::new(),
            admin: false,
            status: UserStatus::Active,
            mail_notification: MailNotification::OnlyMyEvents,
            created_at: None,
            updated_at: None,
        }
    }
}

entity!(User, "users", "User", timestamps);

impl User {
    /// Create a new user with login and mail address
    pub fn new(login: impl Into<String>, mail: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            mail: mail.into(),
            ..Default::default()
        }
    }

    /// Get full name (firstname + lastname)
    pub fn name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_string()
    }

    /// Check if user is active
    pub fn active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether this user is the record with the given id
    pub fn is(&self, id: Option<Id>) -> bool {
        self.id.is_some() && self.id == id
    }

    /// Whether the user wants a mail about changes to the work package,
    /// judged by their own notification option only
    pub fn notify_about(&self, work_package: &WorkPackage) -> bool {
        let is_author = self.is(Some(work_package.author_id));
        let is_assignee = self.is(work_package.assigned_to_id);

        match self.mail_notification {
            MailNotification::All => true,
            MailNotification::Selected | MailNotification::OnlyMyEvents => is_author || is_assignee,
            MailNotification::OnlyAssigned => is_assignee,
            MailNotification::OnlyOwner => is_author,
            MailNotification::None => false,
        }
    }
}
