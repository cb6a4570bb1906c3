//! Group attributes

use op_core::traits::Id;
use op_models::WorkPackage;
use serde::{Deserialize, Serialize};

/// Attribute the counts are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Type,
    Version,
    Priority,
    Category,
    AssignedTo,
    Author,
    /// Work packages of descendant projects, grouped by their project
    Subproject,
}

impl GroupBy {
    pub const ALL: [GroupBy; 7] = [
        GroupBy::Type,
        GroupBy::Version,
        GroupBy::Priority,
        GroupBy::Category,
        GroupBy::AssignedTo,
        GroupBy::Author,
        GroupBy::Subproject,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "type" => Some(Self::Type),
            "version" | "fixed_version" => Some(Self::Version),
            "priority" => Some(Self::Priority),
            "category" => Some(Self::Category),
            "assigned_to" | "assignee" => Some(Self::AssignedTo),
            "author" => Some(Self::Author),
            "subproject" | "project" => Some(Self::Subproject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Version => "version",
            Self::Priority => "priority",
            Self::Category => "category",
            Self::AssignedTo => "assigned_to",
            Self::Author => "author",
            Self::Subproject => "subproject",
        }
    }

    /// Column the work package is grouped on; `None` groups the unset values
    pub fn group_id(&self, work_package: &WorkPackage) -> Option<Id> {
        match self {
            Self::Type => Some(work_package.type_id),
            Self::Version => work_package.fixed_version_id,
            Self::Priority => work_package.priority_id,
            Self::Category => work_package.category_id,
            Self::AssignedTo => work_package.assigned_to_id,
            Self::Author => Some(work_package.author_id),
            Self::Subproject => Some(work_package.project_id),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
