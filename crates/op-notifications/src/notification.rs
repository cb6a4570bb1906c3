//! In-app notifications about work package changes

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use op_journals::Journal;
use op_models::WorkPackage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    Author,
    Assigned,
    /// Project member who asked to hear about everything in the project
    ProjectMember,
}

impl NotificationReason {
    /// Authorship wins over assignment
    pub fn of(user_id: Id, work_package: &WorkPackage) -> Self {
        if user_id == work_package.author_id {
            Self::Author
        } else if work_package.assigned_to_id == Some(user_id) {
            Self::Assigned
        } else {
            Self::ProjectMember
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Option<Id>,
    pub recipient_id: Id,
    pub reason: NotificationReason,
    pub work_package_id: Id,
    pub project_id: Id,
    /// Author of the journaled change
    pub actor_id: Id,
    pub journal_id: Option<Id>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Unread notification for `recipient_id` about the change in `journal`
    pub fn about(work_package_id: Id, work_package: &WorkPackage, journal: &Journal, recipient_id: Id) -> Self {
        Self {
            id: None,
            recipient_id,
            reason: NotificationReason::of(recipient_id, work_package),
            work_package_id,
            project_id: work_package.project_id,
            actor_id: journal.user_id,
            journal_id: journal.id,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    pub fn mark_read(&mut self) {
        self.read_at.get_or_insert_with(Utc::now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use op_journals::JournalType;

    fn assigned_task() -> WorkPackage {
        let mut wp = WorkPackage::new("Ship it", 2, 1);
        wp.author_id = 10;
        wp.assigned_to_id = Some(11);
        wp
    }

    #[test]
    fn test_reason_prefers_authorship() {
        let mut wp = assigned_task();
        assert_eq!(NotificationReason::of(10, &wp), NotificationReason::Author);
        assert_eq!(NotificationReason::of(11, &wp), NotificationReason::Assigned);
        assert_eq!(NotificationReason::of(12, &wp), NotificationReason::ProjectMember);

        wp.assigned_to_id = Some(10);
        assert_eq!(NotificationReason::of(10, &wp), NotificationReason::Author);
    }

    #[test]
    fn test_read_once() {
        let journal = Journal::new(JournalType::WorkPackage, 5, 2, 12);
        let mut n = Notification::about(5, &assigned_task(), &journal, 11);
        assert_eq!((n.actor_id, n.project_id), (12, 2));
        assert!(n.is_unread());

        n.mark_read();
        let first = n.read_at;
        n.mark_read();
        assert_eq!(n.read_at, first);
    }
}
