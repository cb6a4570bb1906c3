//! Roles and the permission names they grant

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Named set of permissions a member holds in a project
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Option<Id>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub position: i32,
    /// Members holding the role can be assigned work packages
    #[serde(default = "assignable_by_default")]
    pub assignable: bool,
    #[serde(default)]
    pub permissions: HashSet<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn assignable_by_default() -> bool {
    true
}

impl Default for Role {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            position: 0,
            assignable: assignable_by_default(),
            permissions: HashSet::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

entity!(Role, "roles", "Role", timestamps);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions.extend(permissions.iter().map(|p| p.to_string()));
        self
    }

    /// Roles that only watch cannot be assigned work
    pub fn not_assignable(mut self) -> Self {
        self.assignable = false;
        self
    }
}

/// Permission names checked by the work package domain
pub mod permissions {
    pub const VIEW_WORK_PACKAGES: &str = "view_work_packages";
    pub const ADD_WORK_PACKAGES: &str = "add_work_packages";
    pub const EDIT_WORK_PACKAGES: &str = "edit_work_packages";
    pub const DELETE_WORK_PACKAGES: &str = "delete_work_packages";
    pub const MOVE_WORK_PACKAGES: &str = "move_work_packages";
    pub const LOG_TIME: &str = "log_time";
}
