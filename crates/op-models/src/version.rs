//! Versions and the rules for sharing them across projects

use chrono::{DateTime, NaiveDate, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Projects besides its own that may use a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionSharing {
    #[default]
    None,
    /// Subprojects at any depth
    Descendants,
    /// Subprojects and ancestors
    Hierarchy,
    /// Every project below the same root
    Tree,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    #[default]
    Open,
    Locked,
    Closed,
}

/// Release a work package can be planned into
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: Option<Id>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub project_id: Id,
    /// Due date of the release; undated versions sort first
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: VersionStatus,
    #[serde(default)]
    pub sharing: VersionSharing,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

entity!(Version, "versions", "Version", timestamps);
project_scoped!(Version);

impl Version {
    pub fn new(name: impl Into<String>, project_id: Id) -> Self {
        Self {
            name: name.into(),
            project_id,
            ..Default::default()
        }
    }

    pub fn with_sharing(mut self, sharing: VersionSharing) -> Self {
        self.sharing = sharing;
        self
    }

    /// Only open versions accept new work packages
    pub fn open(&self) -> bool {
        self.status == VersionStatus::Open
    }

    pub fn closed(&self) -> bool {
        self.status == VersionStatus::Closed
    }
}
