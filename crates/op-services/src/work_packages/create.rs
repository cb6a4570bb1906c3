//! Create Service for Work Packages

use op_attachments::ContainerType;
use op_contracts::work_packages::CreateWorkPackageContract;
use op_contracts::Contract;
use op_core::result::OpResult;
use op_db::Repository;
use op_models::{User, WorkPackage};
use tracing::{debug, info, instrument};

use super::associations::load_associations;
use super::set_attributes::SetAttributesService;
use super::WorkPackageParams;
use crate::base::{acting_user_id, ServiceContext};
use crate::result::ServiceResult;

/// Service for creating work packages
///
/// # Example
/// ```ignore
/// let params = WorkPackageParams::new()
///     .with_subject("New feature")
///     .with_project_id(project_id)
///     .with_type_id(type_id);
/// let result = CreateWorkPackageService::new(&ctx, &user).call(params).await?;
/// ```
pub struct CreateWorkPackageService<'a> {
    ctx: &'a ServiceContext,
    user: &'a User,
}

impl<'a> CreateWorkPackageService<'a> {
    pub fn new(ctx: &'a ServiceContext, user: &'a User) -> Self {
        Self { ctx, user }
    }

    /// Validate and persist a new work package, then journal it.
    ///
    /// A failed result carries the unsaved work package.
    #[instrument(skip(self, params), fields(user = %self.user.login))]
    pub async fn call(&self, params: WorkPackageParams) -> OpResult<ServiceResult<WorkPackage>> {
        let user_id = acting_user_id(self.user)?;
        let mut work_package = WorkPackage::default();

        let mut errors = SetAttributesService::new(self.ctx, self.user)
            .call(&mut work_package, &params)
            .await?;

        let associations = load_associations(&self.ctx.db, &work_package, None).await?;
        if let Err(contract_errors) = CreateWorkPackageContract::new(&associations).validate(&work_package) {
            errors.merge(contract_errors);
        }
        if let Err(err) = self.ctx.attachments.check_files(&params.attachments) {
            errors.add("attachments", err.to_string());
        }
        if !errors.is_empty() {
            debug!(errors = ?errors.full_messages(), "work package invalid");
            return Ok(ServiceResult::failure_with(work_package, errors));
        }

        let work_package = self.ctx.db.work_packages.create(work_package).await?;
        let journal = self
            .ctx
            .journals
            .record_creation(&work_package, user_id, params.notes)
            .await?;

        if let Some(id) = work_package.id {
            if !params.attachments.is_empty() {
                self.ctx
                    .attachments
                    .attach_files(ContainerType::WorkPackage, id, params.attachments, user_id)
                    .await?;
            }
        }
        self.ctx.notifications.notify_updated(&work_package, &journal).await?;

        info!(id = ?work_package.id, subject = %work_package.subject, "work package created");
        Ok(ServiceResult::success(work_package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, fixture_with};
    use op_attachments::UploadedFile;
    use op_core::config::AppConfig;
    use op_db::Repository;
    use op_models::{Category, Type, VersionSharing, VersionStatus};

    fn params(f: &crate::test_support::Fixture) -> WorkPackageParams {
        WorkPackageParams::new()
            .with_subject("test_create")
            .with_project_id(f.project.id.unwrap())
            .with_type_id(f.task.id.unwrap())
    }

    #[tokio::test]
    async fn test_create_with_estimated_hours() {
        let f = fixture().await;
        let result = CreateWorkPackageService::new(&f.ctx, &f.developer)
            .call(params(&f).with_description("IssueTest#test_create").with_estimated_hours("1:30"))
            .await
            .unwrap();

        assert!(result.is_success());
        let created = f.reload(result.result().unwrap()).await;
        assert_eq!(created.estimated_hours, Some(1.5));
        assert_eq!(created.author_id, f.developer.id.unwrap());

        let history = f.ctx.journals.history(created.id.unwrap()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].is_initial());
    }

    #[tokio::test]
    async fn test_create_minimal() {
        let f = fixture().await;
        let result = CreateWorkPackageService::new(&f.ctx, &f.developer)
            .call(params(&f))
            .await
            .unwrap();

        assert!(result.is_success());
        let wp = result.into_result().unwrap();
        assert!(wp.id.is_some());
        assert_eq!(wp.description, None);
        assert_eq!(wp.status_id, f.new_status.id.unwrap());
    }

    #[tokio::test]
    async fn test_create_with_disabled_type_fails() {
        let f = fixture().await;
        let disabled = f.db().types.create(Type::new("Feature")).await.unwrap();

        let result = CreateWorkPackageService::new(&f.ctx, &f.developer)
            .call(params(&f).with_type_id(disabled.id.unwrap()))
            .await
            .unwrap();

        assert!(result.is_failure());
        assert_eq!(result.errors().on("type_id"), ["is not set to one of the allowed values."]);
        assert_eq!(result.result().and_then(|wp| wp.id), None);
        assert_eq!(f.db().work_packages.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_assigns_category_default_assignee() {
        let f = fixture().await;
        let category = f
            .db()
            .categories
            .create(Category::new("Backend", f.project.id.unwrap()).with_assignee(f.developer.id.unwrap()))
            .await
            .unwrap();

        let result = CreateWorkPackageService::new(&f.ctx, &f.admin)
            .call(params(&f).with_category_id(category.id))
            .await
            .unwrap();

        assert_eq!(result.result().unwrap().assigned_to_id, f.developer.id);
    }

    #[tokio::test]
    async fn test_create_checks_version_status() {
        let f = fixture().await;
        let service = CreateWorkPackageService::new(&f.ctx, &f.developer);
        let open = f.add_version(&f.project, "open", VersionStatus::Open, VersionSharing::None).await;
        let locked = f.add_version(&f.project, "locked", VersionStatus::Locked, VersionSharing::None).await;
        let closed = f.add_version(&f.project, "closed", VersionStatus::Closed, VersionSharing::None).await;

        let result = service.call(params(&f).with_fixed_version_id(open.id)).await.unwrap();
        assert!(result.is_success());

        for version in [locked, closed] {
            let result = service.call(params(&f).with_fixed_version_id(version.id)).await.unwrap();
            assert!(result.is_failure(), "{} version accepted", version.name);
            assert!(result.errors().has_error("fixed_version_id"));
        }
    }

    #[tokio::test]
    async fn test_create_attaches_files() {
        let f = fixture().await;
        let result = CreateWorkPackageService::new(&f.ctx, &f.developer)
            .call(params(&f).with_attachment(UploadedFile::new("notes.txt", b"hello".to_vec())))
            .await
            .unwrap();

        let id = result.result().unwrap().id.unwrap();
        let attached = f
            .ctx
            .attachments
            .for_container(ContainerType::WorkPackage, id)
            .await
            .unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].filename, "notes.txt");
    }

    #[tokio::test]
    async fn test_oversized_upload_creates_nothing() {
        let mut config = AppConfig::default();
        config.attachments.max_size = 4;
        let f = fixture_with(config).await;
        let before = f.db().work_packages.count().await.unwrap();

        let result = CreateWorkPackageService::new(&f.ctx, &f.developer)
            .call(params(&f).with_attachment(UploadedFile::new("big.txt", b"too big".to_vec())))
            .await
            .unwrap();

        assert!(result.is_failure());
        assert!(result.errors().has_error("attachments"));
        assert!(result.result().unwrap().id.is_none());
        assert_eq!(f.db().work_packages.count().await.unwrap(), before);
    }
}
