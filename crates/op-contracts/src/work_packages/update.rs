//! Update contract for work packages

use op_core::error::ValidationErrors;
use op_models::WorkPackage;

use super::base::{WorkPackageAssociations, WorkPackageBaseContract};
use crate::base::{ChangeTracker, Contract, ValidationResult};

/// Contract for updating an existing work package
pub struct UpdateWorkPackageContract<'a> {
    base: WorkPackageBaseContract<'a>,
    lock_version_was: i32,
}

impl<'a> UpdateWorkPackageContract<'a> {
    /// `changes` lists the attributes edited since the record was loaded
    pub fn new(associations: &'a WorkPackageAssociations, changes: ChangeTracker, lock_version_was: i32) -> Self {
        Self {
            base: WorkPackageBaseContract::new(associations, changes, false),
            lock_version_was,
        }
    }

    fn validate_persisted(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        if wp.id.is_none() {
            errors.add_base("can't update a record that was never saved");
        }
    }

    /// Another save happened since the record was loaded
    fn validate_lock_version(&self, wp: &WorkPackage, errors: &mut ValidationErrors) {
        if wp.lock_version != self.lock_version_was {
            errors.add_base("Information has been updated by at least one other user in the meantime.");
        }
    }

    /// Get the base contract
    pub fn base(&self) -> &WorkPackageBaseContract<'a> {
        &self.base
    }
}

impl<'a> Contract<WorkPackage> for UpdateWorkPackageContract<'a> {
    fn validate(&self, entity: &WorkPackage) -> ValidationResult {
        let mut errors = self.base.errors_for(entity);
        self.validate_persisted(entity, &mut errors);
        self.validate_lock_version(entity, &mut errors);
        errors.into_result()
    }
}
