//! Work Package services

mod associations;
mod assignable;
mod create;
mod delete;
mod done_ratio;
mod move_project;
mod set_attributes;
mod statuses;
mod update;

pub use assignable::{allowed_target_projects_on_move, assignable_users, assignable_versions};
pub use create::CreateWorkPackageService;
pub use delete::DeleteWorkPackageService;
pub use done_ratio::UpdateDoneRatioService;
pub use move_project::MoveWorkPackageService;
pub use set_attributes::SetAttributesService;
pub use statuses::new_statuses_allowed_to;
pub use update::{UpdateWorkPackageService, WorkPackageUpdate};

use chrono::NaiveDate;
use op_attachments::UploadedFile;
use op_core::traits::Id;

/// Base error when a save lost the race against another user's
pub(crate) const STALE_MESSAGE: &str = "Information has been updated by at least one other user in the meantime.";

/// Attributes to set on a work package.
///
/// `None` leaves an attribute alone. The nullable references take
/// `Some(None)` to clear them.
#[derive(Debug, Clone, Default)]
pub struct WorkPackageParams {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<Id>,
    pub type_id: Option<Id>,
    pub status_id: Option<Id>,
    pub priority_id: Option<Id>,
    pub assigned_to_id: Option<Option<Id>>,
    pub fixed_version_id: Option<Option<Id>>,
    pub category_id: Option<Option<Id>>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub done_ratio: Option<i32>,
    /// As typed by the user: "1.5", "1:30", "1h 30m"; blank clears
    pub estimated_hours: Option<String>,
    /// Journal notes, used by updates
    pub notes: Option<String>,
    /// Time to log together with an update
    pub time_entry: Option<TimeEntryParams>,
    /// Files to attach once the work package saved
    pub attachments: Vec<UploadedFile>,
}

impl WorkPackageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_project_id(mut self, project_id: Id) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_type_id(mut self, type_id: Id) -> Self {
        self.type_id = Some(type_id);
        self
    }

    pub fn with_status_id(mut self, status_id: Id) -> Self {
        self.status_id = Some(status_id);
        self
    }

    pub fn with_priority_id(mut self, priority_id: Id) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    pub fn with_assigned_to_id(mut self, assigned_to_id: Option<Id>) -> Self {
        self.assigned_to_id = Some(assigned_to_id);
        self
    }

    pub fn with_fixed_version_id(mut self, fixed_version_id: Option<Id>) -> Self {
        self.fixed_version_id = Some(fixed_version_id);
        self
    }

    pub fn with_category_id(mut self, category_id: Option<Id>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_dates(mut self, start_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.due_date = Some(due_date);
        self
    }

    pub fn with_done_ratio(mut self, ratio: i32) -> Self {
        self.done_ratio = Some(ratio);
        self
    }

    pub fn with_estimated_hours(mut self, hours: impl Into<String>) -> Self {
        self.estimated_hours = Some(hours.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_time_entry(mut self, time_entry: TimeEntryParams) -> Self {
        self.time_entry = Some(time_entry);
        self
    }

    pub fn with_attachment(mut self, file: UploadedFile) -> Self {
        self.attachments.push(file);
        self
    }
}

/// Time entry attributes submitted with an update
#[derive(Debug, Clone, Default)]
pub struct TimeEntryParams {
    /// As typed, parsed like estimated hours
    pub hours: Option<String>,
    pub activity_id: Option<Id>,
    pub comments: Option<String>,
    pub spent_on: Option<NaiveDate>,
}

impl TimeEntryParams {
    /// Nothing was filled in
    pub fn is_blank(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.hours) && blank(&self.comments) && self.activity_id.is_none() && self.spent_on.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_entry_blankness() {
        assert!(TimeEntryParams::default().is_blank());

        let whitespace = TimeEntryParams {
            hours: Some(" ".into()),
            comments: Some(String::new()),
            ..Default::default()
        };
        assert!(whitespace.is_blank());

        let filled = TimeEntryParams {
            hours: Some("2".into()),
            ..Default::default()
        };
        assert!(!filled.is_blank());
    }

    #[test]
    fn test_builder_clears_references() {
        let params = WorkPackageParams::new()
            .with_subject("Renamed")
            .with_category_id(None)
            .with_assigned_to_id(Some(4));

        assert_eq!(params.subject.as_deref(), Some("Renamed"));
        assert_eq!(params.category_id, Some(None));
        assert_eq!(params.assigned_to_id, Some(Some(4)));
        assert_eq!(params.fixed_version_id, None);
    }
}
