//! Time Entry repository

use op_core::traits::Id;
use op_models::TimeEntry;
use tracing::debug;

use crate::repository::MemoryTable;

pub type TimeEntryRepository = MemoryTable<TimeEntry>;

impl MemoryTable<TimeEntry> {
    pub async fn find_by_work_package(&self, work_package_id: Id) -> Vec<TimeEntry> {
        self.filter(|t| t.work_package_id == Some(work_package_id)).await
    }

    pub async fn find_by_project(&self, project_id: Id) -> Vec<TimeEntry> {
        self.filter(|t| t.project_id == project_id).await
    }

    pub async fn delete_by_work_package(&self, work_package_id: Id) -> usize {
        self.delete_where(|t| t.work_package_id == Some(work_package_id)).await
    }

    /// Re-home the time logged on a work package; returns the number of entries moved
    pub async fn move_to_project(&self, work_package_id: Id, project_id: Id) -> usize {
        let moved = self
            .update_where(
                |t| t.work_package_id == Some(work_package_id),
                |t| t.project_id = project_id,
            )
            .await;
        debug!(work_package_id, project_id, moved, "time entries moved");
        moved
    }

    /// Hours logged on a work package
    pub async fn spent_hours(&self, work_package_id: Id) -> f64 {
        self.find_by_work_package(work_package_id)
            .await
            .iter()
            .filter_map(|t| t.hours)
            .sum()
    }
}
