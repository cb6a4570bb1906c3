//! # op-notifications
//!
//! Who hears about a work package change, and the notifications they get.
//!
//! - `recipients` - Resolves the users to notify about a work package
//! - `notification` - The stored in-app notification
//! - `service` - Writes one notification per recipient for a journal

pub mod notification;
pub mod recipients;
pub mod service;

pub use notification::{Notification, NotificationReason};
pub use recipients::RecipientResolver;
pub use service::{
    MemoryNotificationStore, NotificationError, NotificationResult, NotificationService, NotificationStore,
};
