//! Work Package contracts

mod base;
mod create;
mod update;

pub use base::{WorkPackageAssociations, WorkPackageBaseContract};
pub use create::CreateWorkPackageContract;
pub use update::UpdateWorkPackageContract;

use op_models::WorkPackage;

use crate::base::ChangeTracker;

/// Attributes that differ between the stored and the edited record
pub fn changes_between(was: &WorkPackage, now: &WorkPackage) -> ChangeTracker {
    let mut changes = ChangeTracker::new();
    let mut check = |attribute: &str, changed: bool| {
        if changed {
            changes.mark_changed(attribute);
        }
    };

    check("subject", was.subject != now.subject);
    check("description", was.description != now.description);
    check("project_id", was.project_id != now.project_id);
    check("type_id", was.type_id != now.type_id);
    check("status_id", was.status_id != now.status_id);
    check("priority_id", was.priority_id != now.priority_id);
    check("author_id", was.author_id != now.author_id);
    check("assigned_to_id", was.assigned_to_id != now.assigned_to_id);
    check("fixed_version_id", was.fixed_version_id != now.fixed_version_id);
    check("category_id", was.category_id != now.category_id);
    check("start_date", was.start_date != now.start_date);
    check("due_date", was.due_date != now.due_date);
    check("done_ratio", was.done_ratio != now.done_ratio);
    check("estimated_hours", was.estimated_hours != now.estimated_hours);

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_between() {
        let was = WorkPackage::new("Old", 1, 1);
        let mut now = was.clone();
        assert!(changes_between(&was, &now).is_empty());

        now.subject = "New".into();
        now.fixed_version_id = Some(3);
        let changes = changes_between(&was, &now);
        assert!(changes.is_changed("subject"));
        assert!(changes.is_changed("fixed_version_id"));
        assert!(!changes.is_changed("status_id"));
    }
}
