//! Per-project work package categories

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Work package category, local to one project
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<Id>,

    pub project_id: Id,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Default assignee for new work packages in this category
    pub assigned_to_id: Option<Id>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Category, "categories", "Category", timestamps);
project_scoped!(Category);

impl Category {
    pub fn new(name: impl Into<String>, project_id: Id) -> Self {
        Self {
            name: name.into(),
            project_id,
            ..Default::default()
        }
    }

    pub fn with_assignee(mut self, user_id: Id) -> Self {
        self.assigned_to_id = Some(user_id);
        self
    }
}
