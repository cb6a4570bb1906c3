//! Done ratio from status

use op_core::error::ValidationErrors;
use op_core::result::OpResult;
use op_db::{Repository, RepositoryError};
use op_models::WorkPackage;
use tracing::{debug, instrument, warn};

use super::STALE_MESSAGE;
use crate::base::ServiceContext;
use crate::result::ServiceResult;

/// Copies the status default done ratio onto a work package and saves it
/// when the value changed
pub struct UpdateDoneRatioService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UpdateDoneRatioService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, work_package), fields(id = ?work_package.id))]
    pub async fn call(&self, mut work_package: WorkPackage) -> OpResult<ServiceResult<WorkPackage>> {
        let status = self.ctx.db.statuses.get(work_package.status_id).await?;
        if !work_package.update_done_ratio_from_status(&status, self.ctx.done_ratio_mode()) {
            return Ok(ServiceResult::success(work_package));
        }
        if work_package.id.is_none() {
            return Ok(ServiceResult::success(work_package));
        }

        let saved = match self.ctx.db.work_packages.save(work_package.clone()).await {
            Ok(saved) => saved,
            Err(RepositoryError::Conflict(message)) => {
                warn!(%message, "stale work package");
                let mut errors = ValidationErrors::new();
                errors.add_base(STALE_MESSAGE);
                return Ok(ServiceResult::failure_with(work_package, errors));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(done_ratio = saved.done_ratio, "done ratio taken from status");
        Ok(ServiceResult::success(saved))
    }
}
