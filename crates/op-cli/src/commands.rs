//! Command execution against a seeded database

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use op_core::config::AppConfig;
use op_core::traits::Id;
use op_db::{Database, Repository, Seed};
use op_models::{Project, User, WorkPackage};
use op_notifications::RecipientResolver;
use op_queries::{count_and_group_by, GroupBy};
use op_services::{new_statuses_allowed_to, MoveWorkPackageService, ServiceContext};
use serde_json::{json, Value};
use tracing::info;

use crate::cli::Commands;

pub struct App {
    ctx: ServiceContext,
}

impl App {
    pub async fn load(seed: &Path, config: AppConfig) -> Result<Self> {
        let raw = std::fs::read_to_string(seed).with_context(|| format!("reading seed file {}", seed.display()))?;
        Self::from_yaml(&raw, config).await
    }

    pub async fn from_yaml(raw: &str, config: AppConfig) -> Result<Self> {
        let seed: Seed = serde_yaml::from_str(raw).context("parsing seed")?;
        let db = Database::new();
        db.load(seed).await?;
        Ok(Self {
            ctx: ServiceContext::new(Arc::new(db), config),
        })
    }

    pub async fn run(&self, command: Commands) -> Result<Value> {
        match command {
            Commands::Statuses {
                work_package,
                user,
                include_default,
            } => {
                let user = self.user(&user).await?;
                let work_package = self.work_package(work_package).await?;
                let statuses = new_statuses_allowed_to(&self.ctx.db, &user, &work_package, include_default).await?;
                Ok(serde_json::to_value(statuses)?)
            }
            Commands::Move {
                work_package,
                to,
                type_name,
                user,
            } => {
                let user = self.user(&user).await?;
                let work_package = self.work_package(work_package).await?;
                let target = self.project(&to).await?;
                let type_id = match type_name {
                    Some(name) => Some(
                        self.ctx
                            .db
                            .types
                            .find_by_name(&name)
                            .await
                            .and_then(|t| t.id)
                            .ok_or_else(|| anyhow!("no type named '{}'", name))?,
                    ),
                    None => None,
                };
                let target_id = target.id.ok_or_else(|| anyhow!("project {} has no id", target.identifier))?;

                let result = MoveWorkPackageService::new(&self.ctx, &user)
                    .call(work_package, target_id, type_id)
                    .await?;
                info!(success = result.is_success(), target = %target.identifier, "move finished");
                Ok(json!({
                    "success": result.is_success(),
                    "workPackage": result.result(),
                    "errors": result.full_messages(),
                }))
            }
            Commands::GroupBy { project, attribute } => {
                let group_by = GroupBy::parse(&attribute).ok_or_else(|| anyhow!("cannot group by '{}'", attribute))?;
                let project = self.project(&project).await?;
                let rows = count_and_group_by(&self.ctx.db, &project, group_by).await?;
                Ok(serde_json::to_value(rows)?)
            }
            Commands::Recipients { work_package } => {
                let work_package = self.work_package(work_package).await?;
                let mails = RecipientResolver::new(Arc::clone(&self.ctx.db))
                    .recipients(&work_package)
                    .await?;
                Ok(serde_json::to_value(mails)?)
            }
            Commands::Duration { work_package } => {
                let work_package = self.work_package(work_package).await?;
                Ok(json!({
                    "id": work_package.id,
                    "startDate": work_package.start_date,
                    "dueDate": work_package.due_date,
                    "duration": work_package.duration(),
                }))
            }
        }
    }

    async fn user(&self, login: &str) -> Result<User> {
        self.ctx
            .db
            .users
            .find_by_login(login)
            .await
            .ok_or_else(|| anyhow!("no user with login '{}'", login))
    }

    async fn work_package(&self, id: Id) -> Result<WorkPackage> {
        Ok(self.ctx.db.work_packages.get(id).await?)
    }

    async fn project(&self, identifier: &str) -> Result<Project> {
        self.ctx
            .db
            .projects
            .find_by_identifier(identifier)
            .await
            .ok_or_else(|| anyhow!("no project '{}'", identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = include_str!("../seed.yaml");

    async fn app() -> App {
        App::from_yaml(SEED, AppConfig::default()).await.unwrap()
    }

    fn names(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_statuses_for_author_and_assignee() {
        let app = app().await;
        let value = app
            .run(Commands::Statuses {
                work_package: 1,
                user: "dev".into(),
                include_default: false,
            })
            .await
            .unwrap();
        assert_eq!(names(&value), vec!["New", "In progress", "Closed"]);

        let value = app
            .run(Commands::Statuses {
                work_package: 1,
                user: "reporter".into(),
                include_default: false,
            })
            .await
            .unwrap();
        assert_eq!(names(&value), vec!["New"]);
    }

    #[tokio::test]
    async fn test_move_into_subproject() {
        let app = app().await;
        let value = app
            .run(Commands::Move {
                work_package: 1,
                to: "platform-api".into(),
                type_name: None,
                user: "dev".into(),
            })
            .await
            .unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["workPackage"]["projectId"], json!(2));
        assert_eq!(value["workPackage"]["categoryId"], json!(2));
        assert_eq!(value["workPackage"]["fixedVersionId"], json!(2));
        assert_eq!(app.ctx.db.time_entries.find_by_project(2).await.len(), 2);
    }

    #[tokio::test]
    async fn test_move_with_disabled_type_fails() {
        let app = app().await;
        let value = app
            .run(Commands::Move {
                work_package: 2,
                to: "marketing".into(),
                type_name: None,
                user: "admin".into(),
            })
            .await
            .unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["errors"], json!(["type_id is not set to one of the allowed values."]));
    }

    #[tokio::test]
    async fn test_group_by_priority_counts_every_work_package() {
        let app = app().await;
        let value = app
            .run(Commands::GroupBy {
                project: "platform".into(),
                attribute: "priority".into(),
            })
            .await
            .unwrap();

        let total: u64 = value.as_array().unwrap().iter().map(|r| r["total"].as_u64().unwrap()).sum();
        assert_eq!(total, 3);

        let err = app
            .run(Commands::GroupBy {
                project: "platform".into(),
                attribute: "color".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("color"));
    }

    #[tokio::test]
    async fn test_recipients_and_duration() {
        let app = app().await;
        let value = app.run(Commands::Recipients { work_package: 2 }).await.unwrap();
        assert_eq!(value, json!(["dev@example.com", "reporter@example.com"]));

        let value = app.run(Commands::Duration { work_package: 1 }).await.unwrap();
        assert_eq!(value["duration"], json!(5));
        let value = app.run(Commands::Duration { work_package: 3 }).await.unwrap();
        assert_eq!(value["duration"], json!(1));
    }
}
