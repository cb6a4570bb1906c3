//! Allowed status transitions per role and type

use op_core::traits::Id;
use serde::{Deserialize, Serialize};

/// A permitted status transition
///
/// A row lets members holding `role_id` move work packages of `type_id`
/// from `old_status_id` to `new_status_id`. The `author` and `assignee`
/// flags restrict the row to users who authored the work package or are
/// assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Option<Id>,
    pub role_id: Id,
    pub type_id: Id,
    pub old_status_id: Id,
    pub new_status_id: Id,
    #[serde(default)]
    pub author: bool,
    #[serde(default)]
    pub assignee: bool,
}

entity!(Workflow, "workflows", "Workflow");

impl Workflow {
    pub fn new(role_id: Id, type_id: Id, old_status_id: Id, new_status_id: Id) -> Self {
        Self {
            role_id,
            type_id,
            old_status_id,
            new_status_id,
            ..Default::default()
        }
    }

    pub fn for_author(mut self) -> Self {
        self.author = true;
        self
    }

    pub fn for_assignee(mut self) -> Self {
        self.assignee = true;
        self
    }

    /// Whether this row grants the transition to a user with the given
    /// relation to the work package
    pub fn applies_to(&self, author: bool, assignee: bool) -> bool {
        (!self.author || author) && (!self.assignee || assignee)
    }

    /// Target status ids reachable from `old_status_id`, unique, in row order
    pub fn allowed_new_status_ids(
        workflows: &[Workflow],
        role_ids: &[Id],
        type_id: Id,
        old_status_id: Id,
        author: bool,
        assignee: bool,
    ) -> Vec<Id> {
        let mut ids = Vec::new();
        for w in workflows {
            if w.type_id == type_id
                && w.old_status_id == old_status_id
                && role_ids.contains(&w.role_id)
                && w.applies_to(author, assignee)
                && !ids.contains(&w.new_status_id)
            {
                ids.push(w.new_status_id);
            }
        }
        ids
    }
}
