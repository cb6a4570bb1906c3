//! Errors returned by services and the validation messages contracts collect

use std::collections::HashMap;
use thiserror::Error;

/// Attribute key under which record-level errors are reported (`errors[:base]`)
pub const BASE: &str = "base";

/// Core error type for all OpenProject operations
#[derive(Error, Debug)]
pub enum OpError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conflict: {message}")]
    Conflict { message: String },
}

impl OpError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        OpError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OpError::NotFound { .. } => "not_found",
            OpError::Validation(_) => "validation_failed",
            OpError::Database(_) => "database_error",
            OpError::Internal(_) => "internal_error",
            OpError::Config(_) => "configuration_error",
            OpError::Conflict { .. } => "conflict",
        }
    }
}

/// Messages per attribute, plus record-level ones under `base`
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("Validation errors: {}", self.full_messages().join(", "))]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if field == BASE {
            self.base_errors.push(message.into());
            return;
        }
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field (`"base"` included)
    pub fn has_error(&self, field: &str) -> bool {
        !self.on(field).is_empty()
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Messages for an attribute; empty when it has none
    pub fn on(&self, field: &str) -> &[String] {
        if field == BASE {
            return &self.base_errors;
        }
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, field_messages) in fields {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, the collection otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
