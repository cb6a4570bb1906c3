//! Work package statuses and the workflow lookup between them

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::workflow::Workflow;

/// A lifecycle state; closed statuses end the work on a work package
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: Option<Id>,

    /// Status name (unique)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Whether this status means "closed/done"
    #[serde(default)]
    pub is_closed: bool,

    /// Whether this status is the default for new work packages
    #[serde(default)]
    pub is_default: bool,

    /// Sort position
    #[serde(default)]
    pub position: i32,

    /// Default done ratio for this status (0-100)
    #[validate(range(min = 0, max = 100))]
    pub default_done_ratio: Option<i32>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Status, "statuses", "Status", timestamps);

impl Status {
    /// Create a new status
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Statuses a work package in this status may move to.
    ///
    /// `statuses` is the lookup the workflow targets are resolved against.
    /// Result is ordered by position.
    pub fn new_statuses_allowed_to(
        &self,
        workflows: &[Workflow],
        statuses: &[Status],
        role_ids: &[Id],
        type_id: Id,
        author: bool,
        assignee: bool,
    ) -> Vec<Status> {
        let Some(id) = self.id else {
            return Vec::new();
        };

        let allowed = Workflow::allowed_new_status_ids(workflows, role_ids, type_id, id, author, assignee);
        let mut result: Vec<Status> = statuses
            .iter()
            .filter(|s| s.id.map_or(false, |sid| allowed.contains(&sid)))
            .cloned()
            .collect();
        sort_by_position(&mut result);
        result
    }

    /// Common status names
    pub const NEW: &'static str = "New";
    pub const IN_PROGRESS: &'static str = "In progress";
    pub const CLOSED: &'static str = "Closed";
    pub const REJECTED: &'static str = "Rejected";
}

/// Order statuses the way they are listed in the UI
pub fn sort_by_position(statuses: &mut [Status]) {
    statuses.sort_by_key(|s| (s.position, s.id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses() -> Vec<Status> {
        (1..=5)
            .map(|i| {
                let mut s = Status::new(format!("Status {}", i));
                s.id = Some(i);
                s.position = i as i32;
                s
            })
            .collect()
    }

    fn workflows() -> Vec<Workflow> {
        vec![
            Workflow::new(1, 1, 1, 2),
            Workflow::new(1, 1, 1, 3).for_author(),
            Workflow::new(1, 1, 1, 4).for_assignee(),
            Workflow::new(1, 1, 1, 5).for_author().for_assignee(),
        ]
    }

    fn allowed(author: bool, assignee: bool) -> Vec<Id> {
        let statuses = statuses();
        statuses[0]
            .new_statuses_allowed_to(&workflows(), &statuses, &[1], 1, author, assignee)
            .into_iter()
            .filter_map(|s| s.id)
            .collect()
    }

    #[test]
    fn test_status_new() {
        let status = Status::new("In Progress");
        assert_eq!(status.name, "In Progress");
        assert!(!status.is_closed);
    }

    #[test]
    fn test_workflows_without_author_and_assignee() {
        assert_eq!(allowed(false, false), vec![2]);
    }

    #[test]
    fn test_workflows_with_author() {
        assert_eq!(allowed(true, false), vec![2, 3]);
    }

    #[test]
    fn test_workflows_with_assignee() {
        assert_eq!(allowed(false, true), vec![2, 4]);
    }

    #[test]
    fn test_workflows_with_author_and_assignee() {
        assert_eq!(allowed(true, true), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_other_role_or_type_gets_nothing() {
        let statuses = statuses();
        assert!(statuses[0]
            .new_statuses_allowed_to(&workflows(), &statuses, &[2], 1, true, true)
            .is_empty());
        assert!(statuses[0]
            .new_statuses_allowed_to(&workflows(), &statuses, &[1], 2, true, true)
            .is_empty());
    }

    #[test]
    fn test_sorted_by_position() {
        let mut statuses = statuses();
        statuses[1].position = 10;
        let result = statuses[0].new_statuses_allowed_to(&workflows(), &statuses, &[1], 1, true, false);
        assert_eq!(result.iter().filter_map(|s| s.id).collect::<Vec<_>>(), vec![3, 2]);
    }
}
