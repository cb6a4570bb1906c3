//! Traits every stored record implements

use chrono::{DateTime, Utc};

/// Primary key of every table
pub type Id = i64;

pub trait Identifiable {
    fn id(&self) -> Option<Id>;

    /// Stored records have an id
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    fn is_new_record(&self) -> bool {
        self.id().is_none()
    }
}

pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Records owned by exactly one project
pub trait ProjectScoped {
    fn project_id(&self) -> Option<Id>;
}

/// A record the in-memory tables can store
pub trait Entity: Identifiable + Timestamped + Clone + Send + Sync + 'static {
    const TABLE_NAME: &'static str;

    /// Name used in not-found and conflict errors
    const TYPE_NAME: &'static str;

    /// Called once, when the table inserts the record
    fn assign_id(&mut self, id: Id);

    /// Called on every write; records without timestamps ignore it
    fn touch(&mut self, _now: DateTime<Utc>) {}
}
