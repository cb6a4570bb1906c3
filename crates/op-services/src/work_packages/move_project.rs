//! Move Service for Work Packages

use op_contracts::work_packages::{changes_between, UpdateWorkPackageContract};
use op_contracts::Contract;
use op_core::error::ValidationErrors;
use op_core::result::OpResult;
use op_core::traits::Id;
use op_db::{Repository, RepositoryError};
use op_models::{User, WorkPackage};
use tracing::{debug, info, instrument, warn};

use super::associations::load_associations;
use super::STALE_MESSAGE;
use crate::base::{acting_user_id, ServiceContext};
use crate::result::ServiceResult;

/// Moves a work package into another project
pub struct MoveWorkPackageService<'a> {
    ctx: &'a ServiceContext,
    user: &'a User,
}

impl<'a> MoveWorkPackageService<'a> {
    pub fn new(ctx: &'a ServiceContext, user: &'a User) -> Self {
        Self { ctx, user }
    }

    /// Move `work_package` to `target_project_id`, optionally switching its type.
    ///
    /// The category is swapped for the target's category of the same name,
    /// the version is dropped unless it is shared with the target, and
    /// logged time follows the work package when configured to. Fails when
    /// the type is not enabled in the target.
    #[instrument(skip(self, work_package), fields(id = ?work_package.id, user = %self.user.login))]
    pub async fn call(
        &self,
        work_package: WorkPackage,
        target_project_id: Id,
        new_type_id: Option<Id>,
    ) -> OpResult<ServiceResult<WorkPackage>> {
        let Some(id) = work_package.id else {
            return Ok(ServiceResult::failure_with_base_error("can't move a record that was never saved"));
        };
        let user_id = acting_user_id(self.user)?;
        let project_changed = work_package.project_id != target_project_id;
        let type_changed = new_type_id.map_or(false, |t| t != work_package.type_id);

        if !project_changed && !type_changed {
            debug!("already in target project");
            return Ok(ServiceResult::success(work_package));
        }

        let db = &self.ctx.db;
        let stored = db.work_packages.get(id).await?;
        let mut moved = work_package.clone();

        if project_changed {
            let target = db.projects.get(target_project_id).await?;
            moved.project_id = target_project_id;

            moved.category_id = match moved.category_id {
                Some(category_id) => match db.categories.find_by_id(category_id).await? {
                    Some(category) => db
                        .categories
                        .find_by_name(target_project_id, &category.name)
                        .await
                        .and_then(|c| c.id),
                    None => None,
                },
                None => None,
            };

            if let Some(version_id) = moved.fixed_version_id {
                let hierarchy = db.projects.hierarchy().await?;
                let shared = db
                    .versions
                    .find_by_id(version_id)
                    .await?
                    .map_or(false, |v| v.is_shared_with(target_project_id, &hierarchy));
                if !shared {
                    debug!(version_id, target = %target.identifier, "version not shared with target");
                    moved.fixed_version_id = None;
                }
            }
        }
        if let Some(type_id) = new_type_id {
            moved.type_id = type_id;
        }

        let associations = load_associations(db, &moved, Some(&stored)).await?;
        let contract = UpdateWorkPackageContract::new(&associations, changes_between(&stored, &moved), stored.lock_version);
        if let Err(errors) = contract.validate(&moved) {
            debug!(errors = ?errors.full_messages(), "move rejected");
            return Ok(ServiceResult::failure_with(work_package, errors));
        }

        let saved = match db.work_packages.save(moved).await {
            Ok(saved) => saved,
            Err(RepositoryError::Conflict(message)) => {
                warn!(%message, "stale work package");
                let mut errors = ValidationErrors::new();
                errors.add_base(STALE_MESSAGE);
                return Ok(ServiceResult::failure_with(work_package, errors));
            }
            Err(e) => return Err(e.into()),
        };

        let mut time_entries = 0;
        if project_changed && self.ctx.config.work_packages.move_time_entries {
            time_entries = db.time_entries.move_to_project(id, target_project_id).await;
        }
        self.ctx.journals.record_update(&saved, user_id, None).await?;

        info!(
            from = work_package.project_id,
            to = target_project_id,
            time_entries,
            "work package moved"
        );
        Ok(ServiceResult::success(saved))
    }
}
