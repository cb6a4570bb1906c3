//! Work package priorities

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Priority of a work package; one of them is the default for new ones
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub position: i32,

    /// Whether this is the default priority for new work packages
    #[serde(default)]
    pub is_default: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Priority, "enumerations", "Priority", timestamps);

impl Priority {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
