//! Work package record

use chrono::{DateTime, NaiveDate, Utc};
use op_core::config::DoneRatioMode;
use op_core::traits::Id;
use op_core::types::DateRange;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::status::Status;
use crate::time_entry::TimeEntry;

/// Work Package entity
///
/// The central trackable unit of work in a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    pub id: Option<Id>,

    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub subject: String,

    pub description: Option<String>,

    pub project_id: Id,
    pub type_id: Id,
    pub status_id: Id,
    pub priority_id: Option<Id>,
    pub author_id: Id,
    pub assigned_to_id: Option<Id>,

    /// Version the work package is planned into
    pub fixed_version_id: Option<Id>,
    pub category_id: Option<Id>,

    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,

    /// Percentage done, 0..=100
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub done_ratio: i32,

    pub estimated_hours: Option<f64>,

    /// Optimistic locking counter
    #[serde(default)]
    pub lock_version: i32,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(WorkPackage, "work_packages", "WorkPackage", timestamps);
project_scoped!(WorkPackage);

impl WorkPackage {
    pub fn new(subject: impl Into<String>, project_id: Id, type_id: Id) -> Self {
        Self {
            subject: subject.into(),
            project_id,
            type_id,
            ..Default::default()
        }
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.due_date)
    }

    /// Days between start and due date, both included; 1 when a date is missing
    pub fn duration(&self) -> i64 {
        self.date_range().duration_days()
    }

    /// Effective done ratio for the given status and setting
    pub fn done_ratio_for(&self, status: &Status, mode: DoneRatioMode) -> i32 {
        match status.default_done_ratio {
            Some(ratio) if mode.uses_status() => ratio,
            _ => self.done_ratio,
        }
    }

    /// Copy the status default into `done_ratio` when the setting asks for it.
    ///
    /// Returns whether the stored value changed.
    pub fn update_done_ratio_from_status(&mut self, status: &Status, mode: DoneRatioMode) -> bool {
        if !mode.uses_status() {
            return false;
        }
        match status.default_done_ratio {
            Some(ratio) if ratio != self.done_ratio => {
                self.done_ratio = ratio;
                true
            }
            _ => false,
        }
    }

    /// A new, unsaved time entry booked on this work package
    pub fn add_time_entry(&self) -> TimeEntry {
        TimeEntry {
            project_id: self.project_id,
            work_package_id: self.id,
            ..Default::default()
        }
    }

    pub fn is_assigned_to(&self, user_id: Id) -> bool {
        self.assigned_to_id == Some(user_id)
    }
}
