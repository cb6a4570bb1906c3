//! Project record

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    /// Archived projects accept no moved work packages
    Archived,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<Id>,
    #[validate(length(min = 1, max = 100))]
    pub identifier: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Id>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Types work packages of this project may have
    #[serde(default)]
    pub type_ids: Vec<Id>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Project, "projects", "Project", timestamps);

impl Project {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn child_of(parent_id: Id, identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(identifier, name)
        }
    }

    pub fn active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    pub fn has_type(&self, type_id: Id) -> bool {
        self.type_ids.contains(&type_id)
    }

    pub fn enable_type(&mut self, type_id: Id) {
        if !self.has_type(type_id) {
            self.type_ids.push(type_id);
        }
    }
}
