//! Journals: the numbered history entries of a record

use std::fmt;

use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    WorkPackage,
}

/// Old and new value of one attribute; `None` when it was unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDetail {
    pub property: String,
    pub old_value: Option<JsonValue>,
    pub new_value: Option<JsonValue>,
}

impl JournalDetail {
    pub fn new(property: impl Into<String>, old_value: Option<JsonValue>, new_value: Option<JsonValue>) -> Self {
        Self {
            property: property.into(),
            old_value,
            new_value,
        }
    }
}

impl fmt::Display for JournalDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = |v: &Option<JsonValue>| v.as_ref().map_or_else(|| "(empty)".to_string(), JsonValue::to_string);
        write!(f, "{}: {} -> {}", self.property, value(&self.old_value), value(&self.new_value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub id: Option<Id>,
    pub journable_type: JournalType,
    pub journable_id: Id,
    /// Starts at 1 with the creation journal
    pub version: i32,
    pub user_id: Id,
    pub notes: Option<String>,
    pub details: Vec<JournalDetail>,
    pub created_at: DateTime<Utc>,
}

impl Journal {
    pub fn new(journable_type: JournalType, journable_id: Id, version: i32, user_id: Id) -> Self {
        Self {
            id: None,
            journable_type,
            journable_id,
            version,
            user_id,
            notes: None,
            details: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Blank notes are dropped
    pub fn with_notes(self, notes: Option<String>) -> Self {
        Self {
            notes: notes.filter(|n| !n.trim().is_empty()),
            ..self
        }
    }

    pub fn with_details(self, details: Vec<JournalDetail>) -> Self {
        Self { details, ..self }
    }

    pub fn is_initial(&self) -> bool {
        self.version == 1
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    pub fn detail(&self, property: &str) -> Option<&JournalDetail> {
        self.details.iter().find(|d| d.property == property)
    }
}
