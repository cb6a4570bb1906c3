//! Base contract for work packages

use op_core::error::{ValidationErrors, BASE};
use op_core::traits::Id;
use op_models::{Category, Project, Status, Version, WorkPackage};

use crate::base::{merge_model_errors, ChangeTracker, Contract, ValidationResult};

/// Records the work package rules look at, loaded by the caller
#[derive(Debug, Clone, Default)]
pub struct WorkPackageAssociations {
    pub project: Option<Project>,
    pub status: Option<Status>,
    /// Status stored before the current edit
    pub status_was: Option<Status>,
    pub fixed_version: Option<Version>,
    /// Versions the work package may target (shared open versions plus the stored one)
    pub assignable_version_ids: Vec<Id>,
    pub category: Option<Category>,
}

/// Validations shared by create and update
pub struct WorkPackageBaseContract<'a> {
    associations: &'a WorkPackageAssociations,
    changes: ChangeTracker,
    new_record: bool,
}

impl<'a> WorkPackageBaseContract<'a> {
    pub fn new(associations: &'a WorkPackageAssociations, changes: ChangeTracker, new_record: bool) -> Self {
        Self {
            associations,
            changes,
            new_record,
        }
    }

    fn changed(&self, attribute: &str) -> bool {
        self.new_record || self.changes.is_changed(attribute)
    }

    /// Validate subject is present; the length comes from the model
    pub fn validate_subject(&self, subject: &str, errors: &mut ValidationErrors) {
        if subject.trim().is_empty() {
            errors.add("subject", "can't be blank");
        }
    }

    pub fn validate_presence(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        if wp.project_id == 0 {
            errors.add("project_id", "can't be blank");
        }
        if wp.type_id == 0 {
            errors.add("type_id", "can't be blank");
        }
        if wp.status_id == 0 {
            errors.add("status_id", "can't be blank");
        }
        if wp.author_id == 0 {
            errors.add("author_id", "can't be blank");
        }
        if wp.priority_id.is_none() {
            errors.add("priority_id", "can't be blank");
        }
    }

    /// The type has to be enabled in the project. Only checked when the
    /// type or the project is set anew, so records keep saving after their
    /// type was disabled.
    pub fn validate_type_enabled(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        if wp.type_id == 0 || !(self.changed("type_id") || self.changed("project_id")) {
            return;
        }
        let enabled = self
            .associations
            .project
            .as_ref()
            .map_or(false, |p| p.has_type(wp.type_id));
        if !enabled {
            errors.add("type_id", "is not set to one of the allowed values.");
        }
    }

    pub fn validate_fixed_version(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        let Some(version_id) = wp.fixed_version_id else {
            return;
        };
        if self.changed("fixed_version_id") && !self.associations.assignable_version_ids.contains(&version_id) {
            errors.add("fixed_version_id", "is not included in the list");
        }
    }

    /// A closed work package in a closed version stays closed
    pub fn validate_reopen(&self, errors: &mut ValidationErrors) {
        if self.new_record || !self.changes.is_changed("status_id") {
            return;
        }
        let reopened = matches!(
            (&self.associations.status_was, &self.associations.status),
            (Some(was), Some(now)) if was.is_closed && !now.is_closed
        );
        let in_closed_version = self.associations.fixed_version.as_ref().map_or(false, Version::closed);

        if reopened && in_closed_version {
            errors.add(BASE, "A work package assigned to a closed version cannot be reopened");
        }
    }

    pub fn validate_category(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        if wp.category_id.is_none() {
            return;
        }
        let belongs = self
            .associations
            .category
            .as_ref()
            .map_or(false, |c| c.project_id == wp.project_id);
        if !belongs {
            errors.add("category_id", "is not included in the list");
        }
    }

    /// Validate estimated hours is positive if present
    pub fn validate_estimated_hours(&self, hours: Option<f64>, errors: &mut ValidationErrors) {
        if let Some(h) = hours {
            if h < 0.0 {
                errors.add("estimated_hours", "must be greater than or equal to 0");
            }
        }
    }

    pub fn validate_dates(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        if wp.date_range().is_inverted() {
            errors.add("due_date", "must be greater than start date");
        }
    }

    pub fn errors_for(&self, wp: &WorkPackage) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        self.validate_subject(&wp.subject, &mut errors);
        self.validate_presence(wp, &mut errors);
        self.validate_type_enabled(wp, &mut errors);
        self.validate_fixed_version(wp, &mut errors);
        self.validate_reopen(&mut errors);
        self.validate_category(wp, &mut errors);
        self.validate_estimated_hours(wp.estimated_hours, &mut errors);
        self.validate_dates(wp, &mut errors);
        merge_model_errors(wp, &mut errors);

        errors
    }
}

impl<'a> Contract<WorkPackage> for WorkPackageBaseContract<'a> {
    fn validate(&self, entity: &WorkPackage) -> ValidationResult {
        self.errors_for(entity).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use op_models::VersionStatus;

    fn project() -> Project {
        let mut p = Project::new("alpha", "Alpha");
        p.id = Some(1);
        p.type_ids = vec![1];
        p
    }

    fn version(id: Id, status: VersionStatus) -> Version {
        let mut v = Version::new(format!("v{}", id), 1);
        v.id = Some(id);
        v.status = status;
        v
    }

    fn status(id: Id, closed: bool) -> Status {
        let mut s = Status::new(format!("s{}", id));
        s.id = Some(id);
        s.is_closed = closed;
        s
    }

    fn work_package() -> WorkPackage {
        let mut wp = WorkPackage::new("Test work package", 1, 1);
        wp.status_id = 1;
        wp.priority_id = Some(1);
        wp.author_id = 1;
        wp
    }

    fn associations() -> WorkPackageAssociations {
        WorkPackageAssociations {
            project: Some(project()),
            status: Some(status(1, false)),
            ..Default::default()
        }
    }

    fn validate_new(wp: &WorkPackage, assoc: &WorkPackageAssociations) -> ValidationErrors {
        WorkPackageBaseContract::new(assoc, ChangeTracker::new(), true).errors_for(wp)
    }

    #[test]
    fn test_valid_work_package() {
        assert!(validate_new(&work_package(), &associations()).is_empty());
    }

    #[test]
    fn test_author_required() {
        let mut wp = work_package();
        wp.author_id = 0;
        let errors = validate_new(&wp, &associations());
        assert_eq!(errors.on("author_id"), ["can't be blank".to_string()]);
        assert!(!errors.has_error("subject"));
    }

    #[test]
    fn test_blank_subject() {
        let mut wp = work_package();
        wp.subject = "  ".into();
        assert!(validate_new(&wp, &associations()).has_error("subject"));
    }

    #[test]
    fn test_long_subject() {
        let mut wp = work_package();
        wp.subject = "x".repeat(256);
        let errors = validate_new(&wp, &associations());
        assert_eq!(errors.on("subject"), ["is too long (maximum is 255 characters)".to_string()]);
    }

    #[test]
    fn test_invalid_done_ratio() {
        let mut wp = work_package();
        wp.done_ratio = 150;
        assert!(validate_new(&wp, &associations()).has_error("done_ratio"));
    }

    #[test]
    fn test_negative_estimated_hours() {
        let mut wp = work_package();
        wp.estimated_hours = Some(-1.0);
        assert!(validate_new(&wp, &associations()).has_error("estimated_hours"));
    }

    #[test]
    fn test_due_date_before_start_date() {
        let mut wp = work_package();
        wp.start_date = NaiveDate::from_ymd_opt(2013, 5, 2);
        wp.due_date = NaiveDate::from_ymd_opt(2013, 5, 1);
        assert!(validate_new(&wp, &associations()).has_error("due_date"));
    }

    #[test]
    fn test_disabled_type_on_create() {
        let mut assoc = associations();
        if let Some(p) = assoc.project.as_mut() {
            p.type_ids.clear();
        }
        assert!(validate_new(&work_package(), &assoc).has_error("type_id"));
    }

    #[test]
    fn test_disabled_type_kept_on_unrelated_update() {
        let mut assoc = associations();
        if let Some(p) = assoc.project.as_mut() {
            p.type_ids.clear();
        }
        let mut changes = ChangeTracker::new();
        changes.mark_changed("subject");

        let errors = WorkPackageBaseContract::new(&assoc, changes, false).errors_for(&work_package());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_locked_and_closed_versions_rejected() {
        for s in [VersionStatus::Locked, VersionStatus::Closed] {
            let mut assoc = associations();
            assoc.fixed_version = Some(version(7, s));
            assoc.assignable_version_ids = vec![];
            let mut wp = work_package();
            wp.fixed_version_id = Some(7);

            assert!(validate_new(&wp, &assoc).has_error("fixed_version_id"));
        }
    }

    #[test]
    fn test_open_version_accepted() {
        let mut assoc = associations();
        assoc.fixed_version = Some(version(7, VersionStatus::Open));
        assoc.assignable_version_ids = vec![7];
        let mut wp = work_package();
        wp.fixed_version_id = Some(7);

        assert!(validate_new(&wp, &assoc).is_empty());
    }

    #[test]
    fn test_reopen_in_closed_version() {
        let mut assoc = associations();
        assoc.status_was = Some(status(2, true));
        assoc.status = Some(status(1, false));
        assoc.fixed_version = Some(version(7, VersionStatus::Closed));
        assoc.assignable_version_ids = vec![7];

        let mut changes = ChangeTracker::new();
        changes.mark_changed("status_id");
        let mut wp = work_package();
        wp.fixed_version_id = Some(7);

        let errors = WorkPackageBaseContract::new(&assoc, changes, false).errors_for(&wp);
        assert!(errors.has_error(BASE));
    }

    #[test]
    fn test_reopen_moving_to_open_version() {
        let mut assoc = associations();
        assoc.status_was = Some(status(2, true));
        assoc.status = Some(status(1, false));
        assoc.fixed_version = Some(version(8, VersionStatus::Open));
        assoc.assignable_version_ids = vec![7, 8];

        let mut changes = ChangeTracker::new();
        changes.mark_changed("status_id");
        changes.mark_changed("fixed_version_id");
        let mut wp = work_package();
        wp.fixed_version_id = Some(8);

        let errors = WorkPackageBaseContract::new(&assoc, changes, false).errors_for(&wp);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_category_from_other_project() {
        let mut assoc = associations();
        let mut category = op_models::Category::new("Backend", 2);
        category.id = Some(4);
        assoc.category = Some(category);
        let mut wp = work_package();
        wp.category_id = Some(4);

        assert!(validate_new(&wp, &assoc).has_error("category_id"));
    }
}
