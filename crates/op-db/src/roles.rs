//! Role repository

use op_models::Role;

use crate::repository::MemoryTable;

pub type RoleRepository = MemoryTable<Role>;

impl MemoryTable<Role> {
    /// Roles whose holders may be assigned work packages
    pub async fn assignable(&self) -> Vec<Role> {
        self.filter(|r| r.assignable).await
    }

    pub async fn with_permission(&self, permission: &str) -> Vec<Role> {
        self.filter(|r| r.has_permission(permission)).await
    }
}
