//! Workflow repository

use op_core::traits::Id;
use op_models::{Status, Workflow};

use crate::repository::{MemoryTable, Repository, RepositoryResult};

pub type WorkflowRepository = MemoryTable<Workflow>;

impl MemoryTable<Workflow> {
    pub async fn find_by_role_and_type(&self, role_ids: &[Id], type_id: Id) -> Vec<Workflow> {
        self.filter(|w| w.type_id == type_id && role_ids.contains(&w.role_id))
            .await
    }

    /// Statuses reachable from `status`, read straight from the stored rows
    pub async fn find_new_statuses_allowed_to(
        &self,
        status: &Status,
        role_ids: &[Id],
        type_id: Id,
        author: bool,
        assignee: bool,
        statuses: &MemoryTable<Status>,
    ) -> RepositoryResult<Vec<Status>> {
        let workflows = self.find_by_role_and_type(role_ids, type_id).await;
        let all_statuses = statuses.find_all().await?;
        Ok(status.new_statuses_allowed_to(&workflows, &all_statuses, role_ids, type_id, author, assignee))
    }
}
