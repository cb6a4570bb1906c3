//! Priority repository

use op_models::Priority;

use crate::repository::MemoryTable;

pub type PriorityRepository = MemoryTable<Priority>;

impl MemoryTable<Priority> {
    /// Priority given to new work packages
    pub async fn default_priority(&self) -> Option<Priority> {
        self.find_first(|p| p.is_default).await
    }
}
