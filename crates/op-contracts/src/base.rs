//! Base contract system

use std::collections::HashSet;

use op_core::error::ValidationErrors;
pub use op_core::result::ValidationResult;
use validator::{Validate, ValidationError};

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Change tracking for update contracts
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChangeTracker {
    changed_attributes: HashSet<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_changed(&mut self, attribute: impl Into<String>) {
        self.changed_attributes.insert(attribute.into());
    }

    pub fn is_changed(&self, attribute: &str) -> bool {
        self.changed_attributes.contains(attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.changed_attributes.is_empty()
    }

    pub fn changed_attributes(&self) -> &HashSet<String> {
        &self.changed_attributes
    }
}

/// Run the `validator` derives of a model and collect their messages.
///
/// Attributes already present in `errors` are skipped so a field does not
/// report the same problem twice.
pub fn merge_model_errors<T: Validate>(entity: &T, errors: &mut ValidationErrors) {
    let Err(model_errors) = entity.validate() else {
        return;
    };

    let mut fields: Vec<_> = model_errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, field_errors) in fields {
        if errors.has_error(field) {
            continue;
        }
        for error in field_errors {
            errors.add(field, describe(error));
        }
    }
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        "email" => "is not a valid email address".to_string(),
        code => format!("is invalid ({})", code),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, max = 3))]
        name: String,
        #[validate(range(min = 0, max = 10, message = "must be small"))]
        size: i32,
    }

    #[test]
    fn test_change_tracker() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.is_empty());
        assert!(!tracker.is_changed("subject"));

        tracker.mark_changed("subject");
        assert!(tracker.is_changed("subject"));
        assert!(!tracker.is_changed("description"));
    }

    #[test]
    fn test_merge_model_errors() {
        let mut errors = ValidationErrors::new();
        merge_model_errors(&Named { name: "toolong".into(), size: 11 }, &mut errors);

        assert_eq!(errors.on("name"), ["has an invalid length".to_string()]);
        assert_eq!(errors.on("size"), ["must be small".to_string()]);
    }

    #[test]
    fn test_merge_skips_reported_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "can't be blank");
        merge_model_errors(&Named { name: String::new(), size: 1 }, &mut errors);

        assert_eq!(errors.on("name"), ["can't be blank".to_string()]);
    }
}
