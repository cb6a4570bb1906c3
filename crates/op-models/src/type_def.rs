//! Work package types (Task, Bug, ...)

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of a work package. A project accepts only the types enabled on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub id: Option<Id>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_default: bool,
    /// Milestones are scheduled on a single day
    #[serde(default)]
    pub is_milestone: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Type, "types", "Type", timestamps);

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn milestone(name: impl Into<String>) -> Self {
        Self {
            is_milestone: true,
            ..Self::new(name)
        }
    }
}
