//! # op-attachments
//!
//! Files attached to work packages.
//!
//! - `model` - Attachment records and uploaded files
//! - `storage` - Where the file contents live
//! - `service` - Attaching, listing and removing files of a container
//!
//! ## Example
//!
//! ```rust,ignore
//! use op_attachments::{AttachmentService, ContainerType, UploadedFile};
//!
//! let service = AttachmentService::in_memory(&config.attachments);
//! let attached = service
//!     .attach_files(ContainerType::WorkPackage, 42, vec![UploadedFile::new("log.txt", data)], user_id)
//!     .await?;
//! ```

pub mod model;
pub mod service;
pub mod storage;

pub use model::{Attachment, ContainerType, UploadedFile};
pub use service::{AttachmentError, AttachmentResult, AttachmentService, AttachmentStore, MemoryAttachmentStore};
pub use storage::{generate_disk_filename, MemoryStorage, Storage, StorageError, StoredFile};
