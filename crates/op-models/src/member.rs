//! Project membership: a user holding roles in one project

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Option<Id>,
    pub user_id: Id,
    pub project_id: Id,
    #[serde(default)]
    pub role_ids: Vec<Id>,
    /// Project selected for mails under the `selected` notification option
    #[serde(default)]
    pub mail_notification: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Member, "members", "Membership", timestamps);
project_scoped!(Member);

impl Member {
    pub fn new(user_id: Id, project_id: Id) -> Self {
        Self {
            user_id,
            project_id,
            ..Default::default()
        }
    }

    /// A role is held once per membership
    pub fn with_role(mut self, role_id: Id) -> Self {
        if !self.role_ids.contains(&role_id) {
            self.role_ids.push(role_id);
        }
        self
    }

    pub fn with_mail_notification(mut self) -> Self {
        self.mail_notification = true;
        self
    }
}
