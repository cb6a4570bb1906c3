//! Set Attributes Service for Work Packages

use op_core::error::ValidationErrors;
use op_core::result::OpResult;
use op_core::types::parse_hours;
use op_db::Repository;
use op_models::{User, WorkPackage};
use tracing::debug;

use super::WorkPackageParams;
use crate::base::{acting_user_id, ServiceContext};

/// Applies params to a work package without saving it
pub struct SetAttributesService<'a> {
    ctx: &'a ServiceContext,
    user: &'a User,
}

impl<'a> SetAttributesService<'a> {
    pub fn new(ctx: &'a ServiceContext, user: &'a User) -> Self {
        Self { ctx, user }
    }

    /// Apply `params` and the derived defaults.
    ///
    /// Returns the errors for values that could not be read; contract
    /// validation is left to the caller.
    pub async fn call(&self, work_package: &mut WorkPackage, params: &WorkPackageParams) -> OpResult<ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let status_before = work_package.status_id;

        assign(work_package, params, &mut errors);

        if work_package.id.is_none() {
            self.set_defaults(work_package).await?;
        }
        if work_package.id.is_none() || work_package.status_id != status_before {
            self.update_done_ratio(work_package).await?;
        }
        self.assign_category_default(work_package).await?;

        Ok(errors)
    }

    async fn set_defaults(&self, work_package: &mut WorkPackage) -> OpResult<()> {
        if work_package.author_id == 0 {
            work_package.author_id = acting_user_id(self.user)?;
        }
        if work_package.status_id == 0 {
            if let Some(id) = self.ctx.db.statuses.default_status().await.and_then(|s| s.id) {
                work_package.status_id = id;
            }
        }
        if work_package.priority_id.is_none() {
            work_package.priority_id = self.ctx.db.priorities.default_priority().await.and_then(|p| p.id);
        }
        Ok(())
    }

    async fn update_done_ratio(&self, work_package: &mut WorkPackage) -> OpResult<()> {
        if let Some(status) = self.ctx.db.statuses.find_by_id(work_package.status_id).await? {
            work_package.update_done_ratio_from_status(&status, self.ctx.done_ratio_mode());
        }
        Ok(())
    }

    /// An unassigned work package goes to its category's default assignee
    async fn assign_category_default(&self, work_package: &mut WorkPackage) -> OpResult<()> {
        if work_package.assigned_to_id.is_some() {
            return Ok(());
        }
        let Some(category_id) = work_package.category_id else {
            return Ok(());
        };
        if let Some(category) = self.ctx.db.categories.find_by_id(category_id).await? {
            if category.assigned_to_id.is_some() {
                debug!(category_id, assignee = ?category.assigned_to_id, "category default assignee");
                work_package.assigned_to_id = category.assigned_to_id;
            }
        }
        Ok(())
    }
}

fn assign(work_package: &mut WorkPackage, params: &WorkPackageParams, errors: &mut ValidationErrors) {
    if let Some(subject) = &params.subject {
        work_package.subject = subject.clone();
    }
    if let Some(description) = &params.description {
        work_package.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
    }
    if let Some(project_id) = params.project_id {
        work_package.project_id = project_id;
    }
    if let Some(type_id) = params.type_id {
        work_package.type_id = type_id;
    }
    if let Some(status_id) = params.status_id {
        work_package.status_id = status_id;
    }
    if let Some(priority_id) = params.priority_id {
        work_package.priority_id = Some(priority_id);
    }
    if let Some(assigned_to_id) = params.assigned_to_id {
        work_package.assigned_to_id = assigned_to_id;
    }
    if let Some(fixed_version_id) = params.fixed_version_id {
        work_package.fixed_version_id = fixed_version_id;
    }
    if let Some(category_id) = params.category_id {
        work_package.category_id = category_id;
    }
    if let Some(start_date) = params.start_date {
        work_package.start_date = Some(start_date);
    }
    if let Some(due_date) = params.due_date {
        work_package.due_date = Some(due_date);
    }
    if let Some(done_ratio) = params.done_ratio {
        work_package.done_ratio = done_ratio;
    }
    if let Some(raw) = &params.estimated_hours {
        if raw.trim().is_empty() {
            work_package.estimated_hours = None;
        } else {
            match parse_hours(raw) {
                Some(hours) => work_package.estimated_hours = Some(hours),
                None => errors.add("estimated_hours", "is not a number"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, fixture_with};
    use op_core::config::{AppConfig, DoneRatioMode};
    use op_models::Category;

    #[tokio::test]
    async fn test_new_record_gets_defaults() {
        let f = fixture().await;
        let mut wp = WorkPackage::default();
        let params = WorkPackageParams::new()
            .with_subject("Defaults")
            .with_project_id(f.project.id.unwrap())
            .with_type_id(f.task.id.unwrap());

        let errors = SetAttributesService::new(&f.ctx, &f.developer)
            .call(&mut wp, &params)
            .await
            .unwrap();

        assert!(errors.is_empty());
        assert_eq!(wp.author_id, f.developer.id.unwrap());
        assert_eq!(wp.status_id, f.new_status.id.unwrap());
        assert_eq!(wp.priority_id, f.priority.id);
    }

    #[tokio::test]
    async fn test_estimated_hours_are_parsed() {
        let f = fixture().await;
        let service = SetAttributesService::new(&f.ctx, &f.developer);
        let mut wp = f.work_package("Hours").await;

        service
            .call(&mut wp, &WorkPackageParams::new().with_estimated_hours("1:30"))
            .await
            .unwrap();
        assert_eq!(wp.estimated_hours, Some(1.5));

        let errors = service
            .call(&mut wp, &WorkPackageParams::new().with_estimated_hours("soon"))
            .await
            .unwrap();
        assert!(errors.has_error("estimated_hours"));
        assert_eq!(wp.estimated_hours, Some(1.5));

        service
            .call(&mut wp, &WorkPackageParams::new().with_estimated_hours(" "))
            .await
            .unwrap();
        assert_eq!(wp.estimated_hours, None);
    }

    #[tokio::test]
    async fn test_status_change_sets_done_ratio_in_status_mode() {
        let mut config = AppConfig::default();
        config.work_packages.done_ratio = DoneRatioMode::Status;
        let f = fixture_with(config).await;
        let mut wp = f.work_package("Progress").await;

        SetAttributesService::new(&f.ctx, &f.developer)
            .call(&mut wp, &WorkPackageParams::new().with_status_id(f.in_progress.id.unwrap()))
            .await
            .unwrap();
        assert_eq!(wp.done_ratio, 50);
    }

    #[tokio::test]
    async fn test_category_assignee_only_when_unassigned() {
        let f = fixture().await;
        let category = f
            .db()
            .categories
            .create(Category::new("Backend", f.project.id.unwrap()).with_assignee(f.developer.id.unwrap()))
            .await
            .unwrap();
        let service = SetAttributesService::new(&f.ctx, &f.developer);

        let mut wp = f.work_package("Categorised").await;
        service
            .call(&mut wp, &WorkPackageParams::new().with_category_id(category.id))
            .await
            .unwrap();
        assert_eq!(wp.assigned_to_id, f.developer.id);

        let mut wp = f.work_package("Taken").await;
        service
            .call(
                &mut wp,
                &WorkPackageParams::new()
                    .with_category_id(category.id)
                    .with_assigned_to_id(f.admin.id),
            )
            .await
            .unwrap();
        assert_eq!(wp.assigned_to_id, f.admin.id);
    }
}
