//! Create contract for work packages

use op_models::WorkPackage;

use super::base::{WorkPackageAssociations, WorkPackageBaseContract};
use crate::base::{ChangeTracker, Contract, ValidationResult};

/// Contract for creating a new work package
pub struct CreateWorkPackageContract<'a> {
    base: WorkPackageBaseContract<'a>,
}

impl<'a> CreateWorkPackageContract<'a> {
    pub fn new(associations: &'a WorkPackageAssociations) -> Self {
        Self {
            base: WorkPackageBaseContract::new(associations, ChangeTracker::new(), true),
        }
    }

    /// Get the base contract
    pub fn base(&self) -> &WorkPackageBaseContract<'a> {
        &self.base
    }
}

impl<'a> Contract<WorkPackage> for CreateWorkPackageContract<'a> {
    fn validate(&self, entity: &WorkPackage) -> ValidationResult {
        let mut errors = self.base.errors_for(entity);

        if entity.id.is_some() {
            errors.add_base("has already been created");
        }

        errors.into_result()
    }
}
