//! Delete Service for Work Packages

use op_attachments::ContainerType;
use op_core::result::OpResult;
use op_db::Repository;
use op_models::{User, WorkPackage};
use tracing::{info, instrument};

use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Destroys a work package with its time entries, journals and attachments
pub struct DeleteWorkPackageService<'a> {
    ctx: &'a ServiceContext,
    user: &'a User,
}

impl<'a> DeleteWorkPackageService<'a> {
    pub fn new(ctx: &'a ServiceContext, user: &'a User) -> Self {
        Self { ctx, user }
    }

    #[instrument(skip(self, work_package), fields(id = ?work_package.id, user = %self.user.login))]
    pub async fn call(&self, work_package: WorkPackage) -> OpResult<ServiceResult<WorkPackage>> {
        let Some(id) = work_package.id else {
            return Ok(ServiceResult::failure_with_base_error("can't destroy a record that was never saved"));
        };

        self.ctx.db.work_packages.delete(id).await?;
        let time_entries = self.ctx.db.time_entries.delete_by_work_package(id).await;
        let journals = self.ctx.journals.delete_history(id).await?;
        let attachments = self
            .ctx
            .attachments
            .delete_for_container(ContainerType::WorkPackage, id)
            .await?;

        info!(time_entries, journals, attachments, "work package destroyed");
        Ok(ServiceResult::success(work_package))
    }
}
