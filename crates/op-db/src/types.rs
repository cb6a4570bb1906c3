//! Type repository

use op_models::Type;

use crate::repository::MemoryTable;

pub type TypeRepository = MemoryTable<Type>;

impl MemoryTable<Type> {
    pub async fn find_by_name(&self, name: &str) -> Option<Type> {
        self.find_first(|t| t.name == name).await
    }
}
