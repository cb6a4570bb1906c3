//! # op-journals
//!
//! Change history of work packages.
//!
//! Every saved change of a work package is recorded as a numbered journal
//! carrying the notes and the attribute changes since the previous one.

pub mod journal;
pub mod snapshot;
pub mod service;

pub use journal::{Journal, JournalDetail, JournalType};
pub use snapshot::JournalData;
pub use service::{JournalError, JournalResult, JournalService, JournalStore, MemoryJournalStore};
