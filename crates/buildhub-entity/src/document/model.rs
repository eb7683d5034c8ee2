//! Document aggregate model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buildhub_core::types::{DocumentId, DocumentVersionId, FolderId, ProjectId, TagId};

use super::category::DocumentCategory;
use super::file_type::FileType;
use super::status::DocumentStatus;
use super::version::DocumentVersion;
use super::version_number::VersionNumber;
use crate::patch::double_option;
use crate::tag::DocumentTag;

/// URL prefix under which document content is served.
const DOCUMENT_URL_PREFIX: &str = "/api/documents";

/// A document record together with its version history and tags.
///
/// Exactly one entry of `versions` is active at any time; that entry is
/// the document's current version (see [`Document::current_version`]).
/// `versions` is kept in ascending version order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Display file name (follows the current version).
    pub file_name: String,
    /// File name of the very first upload.
    pub original_name: String,
    /// Size of the current version in bytes.
    pub file_size: i64,
    /// File type derived from the original file name.
    pub file_type: FileType,
    /// MIME type of the original upload.
    pub mime_type: String,
    /// Business category.
    pub category: DocumentCategory,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Free-form description.
    pub description: Option<String>,
    /// Containing folder, if filed.
    pub folder_id: Option<FolderId>,
    /// Related construction project, if any.
    pub project_id: Option<ProjectId>,
    /// User who created the document.
    pub uploaded_by: i64,
    /// When the document was created.
    pub uploaded_at: DateTime<Utc>,
    /// When the document was last changed.
    pub updated_at: DateTime<Utc>,
    /// Attached tags.
    pub tags: Vec<DocumentTag>,
    /// Version history, ascending.
    pub versions: Vec<DocumentVersion>,
    /// Download URL.
    pub download_url: String,
    /// Inline preview URL for previewable types.
    pub preview_url: Option<String>,
    /// Thumbnail URL for images.
    pub thumbnail_url: Option<String>,
}

/// Metadata of an uploaded file. The bytes themselves are not modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    /// Client-side file name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type reported by the client.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Options supplied alongside a new document's first upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentOptions {
    /// Business category.
    #[serde(default)]
    pub category: DocumentCategory,
    /// Initial status.
    #[serde(default)]
    pub status: DocumentStatus,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Folder to file the document in.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// Related project.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Tags to attach.
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
    /// Change log recorded on version 1.0.
    #[serde(default)]
    pub change_log: Option<String>,
}

/// Explicit update command for a document.
///
/// Absent fields are left untouched. For nullable fields an explicit
/// `null` clears the value. Versions can only change through the version
/// workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// New display file name.
    #[serde(default)]
    pub file_name: Option<String>,
    /// New description (`Some(None)` clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New category.
    #[serde(default)]
    pub category: Option<DocumentCategory>,
    /// New status.
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    /// New folder (`Some(None)` moves the document out of any folder).
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<FolderId>>,
    /// New project (`Some(None)` clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<ProjectId>>,
    /// Replacement tag set.
    #[serde(default)]
    pub tag_ids: Option<Vec<TagId>>,
}

impl Document {
    /// Build a new document whose first version ("1.0") is active.
    pub fn new(
        upload: &FileUpload,
        options: &DocumentOptions,
        tags: Vec<DocumentTag>,
        uploaded_by: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let id = DocumentId::new();
        let file_type = FileType::from_file_name(&upload.file_name);
        let mime_type = upload
            .mime_type
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| file_type.default_mime_type().to_string());

        let first = DocumentVersion {
            id: DocumentVersionId::new(),
            document_id: id,
            version: VersionNumber::INITIAL,
            file_name: upload.file_name.clone(),
            file_size: upload.file_size,
            uploaded_by,
            uploaded_at: now,
            change_log: options.change_log.clone(),
            is_active: true,
        };

        let mut document = Self {
            id,
            file_name: upload.file_name.clone(),
            original_name: upload.file_name.clone(),
            file_size: upload.file_size,
            file_type,
            mime_type,
            category: options.category,
            status: options.status,
            description: options.description.clone(),
            folder_id: options.folder_id,
            project_id: options.project_id,
            uploaded_by,
            uploaded_at: now,
            updated_at: now,
            tags,
            versions: vec![first],
            download_url: String::new(),
            preview_url: None,
            thumbnail_url: None,
        };
        document.refresh_urls();
        document
    }

    /// Recompute the content URLs from the id and file type.
    pub fn refresh_urls(&mut self) {
        let prefix = format!("{DOCUMENT_URL_PREFIX}/{}", self.id);
        self.download_url = format!("{prefix}/download");
        self.preview_url = self
            .file_type
            .is_previewable()
            .then(|| format!("{prefix}/preview"));
        self.thumbnail_url = self
            .file_type
            .is_image()
            .then(|| format!("{prefix}/thumbnail"));
    }

    /// The active version.
    ///
    /// `None` only for a record that violates the single-active-version
    /// invariant, which no code path in this crate produces.
    pub fn current_version(&self) -> Option<&DocumentVersion> {
        self.versions.iter().find(|v| v.is_active)
    }

    /// Highest version number in the history.
    pub fn latest_version_number(&self) -> VersionNumber {
        self.versions
            .iter()
            .map(|v| v.version)
            .max()
            .unwrap_or(VersionNumber::INITIAL)
    }

    /// Append a new version and make it current.
    ///
    /// The new number is the current one plus 0.1; every earlier version is
    /// deactivated and the document's file name and size follow the new
    /// upload. Returns the new version.
    pub fn push_version(
        &mut self,
        upload: &FileUpload,
        change_log: Option<String>,
        uploaded_by: i64,
        now: DateTime<Utc>,
    ) -> &DocumentVersion {
        let number = self.latest_version_number().next();

        for version in &mut self.versions {
            version.is_active = false;
        }

        self.versions.push(DocumentVersion {
            id: DocumentVersionId::new(),
            document_id: self.id,
            version: number,
            file_name: upload.file_name.clone(),
            file_size: upload.file_size,
            uploaded_by,
            uploaded_at: now,
            change_log,
            is_active: true,
        });

        self.file_name = upload.file_name.clone();
        self.file_size = upload.file_size;
        self.updated_at = now;

        &self.versions[self.versions.len() - 1]
    }

    /// Whether a tag with the given id is attached.
    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.iter().any(|t| t.id == *tag_id)
    }

    /// Whether any of the given tags is attached.
    pub fn has_any_tag(&self, tag_ids: &[TagId]) -> bool {
        tag_ids.iter().any(|id| self.has_tag(id))
    }

    /// Attach tags not yet present, keeping the existing order.
    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = DocumentTag>) {
        for tag in tags {
            if !self.has_tag(&tag.id) {
                self.tags.push(tag);
            }
        }
    }

    /// Detach the given tags.
    pub fn remove_tags(&mut self, tag_ids: &[TagId]) {
        self.tags.retain(|t| !tag_ids.contains(&t.id));
    }

    /// Apply the scalar fields of an update command and refresh `updated_at`.
    ///
    /// The tag set is replaced separately because tags must be resolved
    /// against the tag store first.
    pub fn apply_update(&mut self, update: &UpdateDocument, now: DateTime<Utc>) {
        if let Some(file_name) = &update.file_name {
            self.file_name = file_name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(folder_id) = update.folder_id {
            self.folder_id = folder_id;
        }
        if let Some(project_id) = update.project_id {
            self.project_id = project_id;
        }
        self.updated_at = now;
    }
}
