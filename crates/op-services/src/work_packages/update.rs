//! Update Service for Work Packages

use chrono::Utc;
use op_attachments::{Attachment, ContainerType};
use op_contracts::work_packages::{changes_between, UpdateWorkPackageContract};
use op_contracts::Contract;
use op_core::error::ValidationErrors;
use op_core::result::OpResult;
use op_core::traits::Id;
use op_core::types::parse_hours;
use op_db::{Repository, RepositoryError};
use op_journals::Journal;
use op_models::{TimeEntry, User, WorkPackage};
use op_notifications::Notification;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::associations::load_associations;
use super::set_attributes::SetAttributesService;
use super::{TimeEntryParams, WorkPackageParams, STALE_MESSAGE};
use crate::base::{acting_user_id, ServiceContext};
use crate::result::ServiceResult;

/// What an update produced
#[derive(Debug, Clone, Serialize)]
pub struct WorkPackageUpdate {
    pub work_package: WorkPackage,
    /// `None` when nothing changed and no notes were given
    pub journal: Option<Journal>,
    /// Unsaved when the update failed
    pub time_entry: Option<TimeEntry>,
    pub attachments: Vec<Attachment>,
    pub notifications: Vec<Notification>,
}

impl WorkPackageUpdate {
    fn unsaved(work_package: WorkPackage, time_entry: Option<TimeEntry>) -> Self {
        Self {
            work_package,
            journal: None,
            time_entry,
            attachments: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

/// Service for updating work packages
///
/// # Example
/// ```ignore
/// let params = WorkPackageParams::new()
///     .with_status_id(closed_id)
///     .with_notes("Fixed in 2.1");
/// let result = UpdateWorkPackageService::new(&ctx, &user).call(work_package, params).await?;
/// ```
pub struct UpdateWorkPackageService<'a> {
    ctx: &'a ServiceContext,
    user: &'a User,
    send_notifications: bool,
}

impl<'a> UpdateWorkPackageService<'a> {
    pub fn new(ctx: &'a ServiceContext, user: &'a User) -> Self {
        Self {
            ctx,
            user,
            send_notifications: true,
        }
    }

    pub fn without_notifications(ctx: &'a ServiceContext, user: &'a User) -> Self {
        Self {
            send_notifications: false,
            ..Self::new(ctx, user)
        }
    }

    /// Apply `params` to `work_package` and save it.
    ///
    /// Notes go into the journal. The time entry and the attachments are
    /// only stored when the work package saved.
    #[instrument(skip(self, work_package, params), fields(id = ?work_package.id, user = %self.user.login))]
    pub async fn call(
        &self,
        mut work_package: WorkPackage,
        params: WorkPackageParams,
    ) -> OpResult<ServiceResult<WorkPackageUpdate>> {
        let Some(id) = work_package.id else {
            return Ok(ServiceResult::failure_with_base_error("can't update a record that was never saved"));
        };
        let user_id = acting_user_id(self.user)?;
        let stored = self.ctx.db.work_packages.get(id).await?;

        let mut errors = SetAttributesService::new(self.ctx, self.user)
            .call(&mut work_package, &params)
            .await?;

        let time_entry = match &params.time_entry {
            Some(entry) if !entry.is_blank() => {
                Some(self.build_time_entry(&work_package, entry, user_id, &mut errors).await?)
            }
            _ => None,
        };

        let associations = load_associations(&self.ctx.db, &work_package, Some(&stored)).await?;
        let contract = UpdateWorkPackageContract::new(
            &associations,
            changes_between(&stored, &work_package),
            stored.lock_version,
        );
        if let Err(contract_errors) = contract.validate(&work_package) {
            errors.merge(contract_errors);
        }
        if let Err(err) = self.ctx.attachments.check_files(&params.attachments) {
            errors.add("attachments", err.to_string());
        }
        if !errors.is_empty() {
            debug!(errors = ?errors.full_messages(), "work package invalid");
            return Ok(ServiceResult::failure_with(
                WorkPackageUpdate::unsaved(work_package, time_entry),
                errors,
            ));
        }

        let saved = match self.ctx.db.work_packages.save(work_package.clone()).await {
            Ok(saved) => saved,
            Err(RepositoryError::Conflict(message)) => {
                warn!(%message, "stale work package");
                let mut errors = ValidationErrors::new();
                errors.add_base(STALE_MESSAGE);
                return Ok(ServiceResult::failure_with(
                    WorkPackageUpdate::unsaved(work_package, time_entry),
                    errors,
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let time_entry = match time_entry {
            Some(entry) => Some(self.ctx.db.time_entries.create(entry).await?),
            None => None,
        };
        let attachments = if params.attachments.is_empty() {
            Vec::new()
        } else {
            self.ctx
                .attachments
                .attach_files(ContainerType::WorkPackage, id, params.attachments, user_id)
                .await?
        };

        let journal = self.ctx.journals.record_update(&saved, user_id, params.notes).await?;
        let notifications = match &journal {
            Some(journal) if self.send_notifications => self.ctx.notifications.notify_updated(&saved, journal).await?,
            _ => Vec::new(),
        };

        info!(
            lock_version = saved.lock_version,
            journaled = journal.is_some(),
            logged = time_entry.is_some(),
            attachments = attachments.len(),
            "work package updated"
        );
        Ok(ServiceResult::success(WorkPackageUpdate {
            work_package: saved,
            journal,
            time_entry,
            attachments,
            notifications,
        }))
    }

    /// Time entry booked by the updating user, today unless a day is given
    async fn build_time_entry(
        &self,
        work_package: &WorkPackage,
        params: &TimeEntryParams,
        user_id: Id,
        errors: &mut ValidationErrors,
    ) -> OpResult<TimeEntry> {
        let mut entry = work_package.add_time_entry();
        entry.user_id = Some(user_id);
        entry.spent_on = Some(params.spent_on.unwrap_or_else(|| Utc::now().date_naive()));
        entry.comments = params.comments.clone().filter(|c| !c.trim().is_empty());
        entry.activity_id = match params.activity_id {
            Some(id) => Some(id),
            None => self.ctx.db.activities.default_activity().await.and_then(|a| a.id),
        };
        entry.hours = params
            .hours
            .as_deref()
            .and_then(parse_hours)
            .filter(|h| *h >= 0.0);

        let missing = entry.missing_attributes();
        if !missing.is_empty() {
            debug!(?missing, "time entry invalid");
            errors.add("time_entries", "is invalid");
        }
        Ok(entry)
    }
}
