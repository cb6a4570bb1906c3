//! Runtime configuration
//!
//! Values come from `OPENPROJECT_*` environment variables on top of the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::types::MailNotification;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Work package behaviour
    pub work_packages: WorkPackageSettings,

    /// Notification delivery
    pub notifications: NotificationConfig,

    /// Attachment limits
    pub attachments: AttachmentConfig,

    /// Log output
    pub logging: LoggingConfig,
}

/// How the done ratio of a work package is determined
/// (OpenProject's `work_package_done_ratio` setting)
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DoneRatioMode {
    /// Stored on the work package and edited by users
    #[default]
    Field,
    /// Taken from the default done ratio of the work package's status
    Status,
    Disabled,
}

impl DoneRatioMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "field" | "issue_field" => Some(Self::Field),
            "status" | "issue_status" => Some(Self::Status),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn uses_status(&self) -> bool {
        matches!(self, Self::Status)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkPackageSettings {
    pub done_ratio: DoneRatioMode,
    /// Re-home logged time when a work package changes project
    pub move_time_entries: bool,
}

impl Default for WorkPackageSettings {
    fn default() -> Self {
        Self {
            done_ratio: DoneRatioMode::Field,
            move_time_entries: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    /// Option assigned to newly created users
    pub default_mail_notification: MailNotification,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_mail_notification: MailNotification::OnlyMyEvents,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Maximum attachment size in bytes
    pub max_size: u64,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_size: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let parse_bool = |v: &str| v == "true" || v == "1" || v == "yes";

        if let Some(v) = lookup("OPENPROJECT_WORK_PACKAGE_DONE_RATIO") {
            config.work_packages.done_ratio =
                DoneRatioMode::parse(&v).ok_or_else(|| ConfigError::InvalidValue {
                    key: "OPENPROJECT_WORK_PACKAGE_DONE_RATIO".to_string(),
                    message: format!("unknown mode '{}'", v),
                })?;
        }
        if let Some(v) = lookup("OPENPROJECT_MOVE_TIME_ENTRIES") {
            config.work_packages.move_time_entries = parse_bool(&v);
        }

        if let Some(v) = lookup("OPENPROJECT_NOTIFICATIONS_ENABLED") {
            config.notifications.enabled = parse_bool(&v);
        }
        if let Some(v) = lookup("OPENPROJECT_DEFAULT_NOTIFICATION_OPTION") {
            config.notifications.default_mail_notification =
                MailNotification::parse(&v).ok_or_else(|| ConfigError::InvalidValue {
                    key: "OPENPROJECT_DEFAULT_NOTIFICATION_OPTION".to_string(),
                    message: format!("unknown option '{}'", v),
                })?;
        }

        if let Some(v) = lookup("OPENPROJECT_ATTACHMENT_MAX_SIZE") {
            config.attachments.max_size = v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "OPENPROJECT_ATTACHMENT_MAX_SIZE".to_string(),
                message: format!("'{}' is not a byte count", v),
            })?;
        }

        if let Some(v) = lookup("OPENPROJECT_LOG_FILTER") {
            config.logging.filter = v;
        }
        if let Some(v) = lookup("OPENPROJECT_LOG_JSON") {
            config.logging.json = parse_bool(&v);
        }

        Ok(config)
    }
}
