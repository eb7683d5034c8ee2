//! Document version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buildhub_core::types::{DocumentId, DocumentVersionId};

use super::version_number::VersionNumber;

/// An immutable snapshot of an uploaded file.
///
/// Only `is_active` changes after creation: it is cleared when a newer
/// version is promoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Unique version identifier.
    pub id: DocumentVersionId,
    /// The owning document.
    pub document_id: DocumentId,
    /// Decimal version number.
    pub version: VersionNumber,
    /// File name of this upload.
    pub file_name: String,
    /// Size of this upload in bytes.
    pub file_size: i64,
    /// User who uploaded this version.
    pub uploaded_by: i64,
    /// When this version was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Optional description of what changed.
    pub change_log: Option<String>,
    /// Whether this is the document's current version.
    pub is_active: bool,
}
