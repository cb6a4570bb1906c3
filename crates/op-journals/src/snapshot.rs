//! Journal Data
//!
//! The journaled attributes of a work package at one point in time.
//! Consecutive snapshots are compared to produce the journal details.

use std::collections::BTreeMap;

use op_models::WorkPackage;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::journal::JournalDetail;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalData {
    /// Set attributes only; unset ones are absent
    pub fields: BTreeMap<String, JsonValue>,
}

impl JournalData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `key`; `null` values are left out
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) -> serde_json::Result<()> {
        let key = key.into();
        match serde_json::to_value(value)? {
            JsonValue::Null => {
                self.fields.remove(&key);
            }
            value => {
                self.fields.insert(key, value);
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    pub fn from_work_package(wp: &WorkPackage) -> serde_json::Result<Self> {
        let mut data = Self::new();
        data.set("subject", &wp.subject)?;
        data.set("description", &wp.description)?;
        data.set("project_id", wp.project_id)?;
        data.set("type_id", wp.type_id)?;
        data.set("status_id", wp.status_id)?;
        data.set("priority_id", wp.priority_id)?;
        data.set("author_id", wp.author_id)?;
        data.set("assigned_to_id", wp.assigned_to_id)?;
        data.set("fixed_version_id", wp.fixed_version_id)?;
        data.set("category_id", wp.category_id)?;
        data.set("start_date", wp.start_date)?;
        data.set("due_date", wp.due_date)?;
        data.set("done_ratio", wp.done_ratio)?;
        data.set("estimated_hours", wp.estimated_hours)?;
        Ok(data)
    }

    /// Attributes that differ from `previous`, in attribute name order
    pub fn changes_since(&self, previous: &JournalData) -> Vec<JournalDetail> {
        let mut keys: Vec<&String> = self.fields.keys().chain(previous.fields.keys()).collect();
        keys.sort();
        keys.dedup();

        keys.into_iter()
            .filter_map(|key| {
                let old = previous.fields.get(key);
                let new = self.fields.get(key);
                (old != new).then(|| JournalDetail::new(key.clone(), old.cloned(), new.cloned()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_leaves_out_unset_attributes() {
        let wp = WorkPackage::new("Write docs", 1, 2);
        let data = JournalData::from_work_package(&wp).unwrap();

        assert_eq!(data.get("subject"), Some(&json!("Write docs")));
        assert_eq!(data.get("type_id"), Some(&json!(2)));
        assert!(data.get("category_id").is_none());
    }

    #[test]
    fn test_changes_since() {
        let mut wp = WorkPackage::new("Write docs", 1, 2);
        wp.category_id = Some(3);
        let before = JournalData::from_work_package(&wp).unwrap();

        wp.subject = "Write more docs".into();
        wp.category_id = None;
        wp.assigned_to_id = Some(8);
        let after = JournalData::from_work_package(&wp).unwrap();

        let changes = after.changes_since(&before);
        let properties: Vec<_> = changes.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(properties, vec!["assigned_to_id", "category_id", "subject"]);
        assert_eq!(changes[1].new_value, None);
        assert!(after.changes_since(&after).is_empty());
    }
}
