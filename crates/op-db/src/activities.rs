//! Time entry activity repository

use op_models::TimeEntryActivity;

use crate::repository::MemoryTable;

pub type ActivityRepository = MemoryTable<TimeEntryActivity>;

impl MemoryTable<TimeEntryActivity> {
    /// Activity preselected when logging time
    pub async fn default_activity(&self) -> Option<TimeEntryActivity> {
        self.find_first(|a| a.is_default).await
    }
}
