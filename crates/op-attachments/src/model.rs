//! Attachment Model

use bytes::Bytes;
use chrono::{DateTime, Utc};
use op_core::traits::Id;
use serde::{Deserialize, Serialize};

/// Record types that can carry attachments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ContainerType {
    WorkPackage,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkPackage => "WorkPackage",
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An attachment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Option<Id>,
    pub container_type: ContainerType,
    pub container_id: Id,
    /// Original filename
    pub filename: String,
    /// Key of the contents in storage
    pub disk_filename: String,
    /// Size in bytes
    pub filesize: u64,
    pub content_type: String,
    /// Hex encoded SHA-256 of the contents
    pub digest: String,
    pub author_id: Id,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn extension(&self) -> Option<&str> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
    }

    /// Size for display, e.g. `1.5 KB`
    pub fn human_filesize(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut size = self.filesize as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} {}", self.filesize, UNITS[0])
        } else {
            format!("{:.1} {}", size, UNITS[unit])
        }
    }
}

/// A file as received with a request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    /// Guessed from the filename when not given
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            description: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
