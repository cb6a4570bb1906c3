//! Logged time and the activities it is booked on

use chrono::{DateTime, NaiveDate, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Time logged by a user, usually on a work package
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: Option<Id>,
    pub project_id: Id,
    pub work_package_id: Option<Id>,
    pub user_id: Option<Id>,
    pub activity_id: Option<Id>,

    #[validate(range(min = 0.0))]
    pub hours: Option<f64>,

    #[validate(length(max = 255))]
    pub comments: Option<String>,

    pub spent_on: Option<NaiveDate>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(TimeEntry, "time_entries", "TimeEntry", timestamps);
project_scoped!(TimeEntry);

impl TimeEntry {
    /// Required attributes that are still unset
    pub fn missing_attributes(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.user_id.is_none() {
            missing.push("user_id");
        }
        if self.activity_id.is_none() {
            missing.push("activity_id");
        }
        if self.hours.is_none() {
            missing.push("hours");
        }
        if self.spent_on.is_none() {
            missing.push("spent_on");
        }
        missing
    }
}

/// Activity a time entry is booked on (Development, Design, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryActivity {
    pub id: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_default: bool,
}

entity!(TimeEntryActivity, "enumerations", "TimeEntryActivity");

impl TimeEntryActivity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
