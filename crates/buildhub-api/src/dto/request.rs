//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::types::{FolderId, ProjectId, TagId};
use buildhub_entity::document::{
    DocumentCategory, DocumentOptions, DocumentStatus, FileUpload, UpdateDocument,
};
use buildhub_entity::finance::LineItem;
use buildhub_entity::folder::UpdateFolder;
use buildhub_entity::patch::double_option;
use buildhub_service::DocumentFilter;

/// Create document request: metadata of the uploaded file plus options.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    /// Client-side file name.
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    /// Size in bytes.
    #[validate(range(min = 0, message = "File size cannot be negative"))]
    pub file_size: i64,
    /// MIME type reported by the client.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Category, status, folder, project, tags, and change log.
    #[serde(flatten)]
    pub options: DocumentOptions,
}

impl CreateDocumentRequest {
    /// Split into the upload metadata and the document options.
    pub fn into_parts(self) -> (FileUpload, DocumentOptions) {
        (
            FileUpload {
                file_name: self.file_name,
                file_size: self.file_size,
                mime_type: self.mime_type,
            },
            self.options,
        )
    }
}

/// Upload new version request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadVersionRequest {
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    #[validate(range(min = 0, message = "File size cannot be negative"))]
    pub file_size: i64,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// What changed in this version.
    #[serde(default)]
    pub change_log: Option<String>,
}

impl UploadVersionRequest {
    /// Split into the upload metadata and the change log.
    pub fn into_parts(self) -> (FileUpload, Option<String>) {
        (
            FileUpload {
                file_name: self.file_name,
                file_size: self.file_size,
                mime_type: self.mime_type,
            },
            self.change_log,
        )
    }
}

/// Update document request. Absent fields are left untouched; `null`
/// clears nullable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub category: Option<DocumentCategory>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<FolderId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<ProjectId>>,
    /// Replacement tag set.
    #[serde(default)]
    pub tag_ids: Option<Vec<TagId>>,
}

impl From<UpdateDocumentRequest> for UpdateDocument {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            file_name: req.file_name,
            description: req.description,
            category: req.category,
            status: req.status,
            folder_id: req.folder_id,
            project_id: req.project_id,
            tag_ids: req.tag_ids,
        }
    }
}

/// Add tags to a document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddTagsRequest {
    /// Tags to attach.
    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tag_ids: Vec<TagId>,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder ID (None for root-level).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Update folder request: rename and/or move.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: Option<String>,
    /// New parent; `null` moves the folder to the root.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<FolderId>>,
}

impl From<UpdateFolderRequest> for UpdateFolder {
    fn from(req: UpdateFolderRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
        }
    }
}

/// Create tag request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 100, message = "Tag name must be 1-100 characters"))]
    pub name: String,
    /// `#RRGGBB`.
    pub color: String,
}

/// Totals calculation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TotalsRequest {
    /// Line items to total.
    pub items: Vec<LineItem>,
}

/// Query string for `GET /api/documents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub file_type: Option<String>,
    pub status: Option<String>,
    pub folder_id: Option<String>,
    pub project_id: Option<String>,
    pub uploaded_by: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (start of day).
    pub date_from: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (end of day).
    pub date_to: Option<String>,
    /// Comma-separated tag IDs.
    pub tag_ids: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Treat empty query values as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_field<T: std::str::FromStr>(value: &Option<String>, field: &str) -> AppResult<Option<T>> {
    present(value)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| AppError::validation(format!("Invalid {field}: '{v}'")))
        })
        .transpose()
}

fn parse_date(value: &Option<String>, field: &str, end_of_day: bool) -> AppResult<Option<DateTime<Utc>>> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid {field}: '{raw}'")))?;
    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
    } else {
        Some(NaiveTime::MIN)
    };
    Ok(time.map(|t| date.and_time(t).and_utc()))
}

impl DocumentListQuery {
    /// Parse the query into a service filter.
    pub fn into_filter(self) -> AppResult<DocumentFilter> {
        let tag_ids = match present(&self.tag_ids) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<TagId>()
                        .map_err(|_| AppError::validation(format!("Invalid tag_ids: '{s}'")))
                })
                .collect::<AppResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(DocumentFilter {
            search: present(&self.search).map(str::to_string),
            category: parse_field(&self.category, "category")?,
            file_type: parse_field(&self.file_type, "file_type")?,
            status: parse_field(&self.status, "status")?,
            folder_id: parse_field(&self.folder_id, "folder_id")?,
            project_id: parse_field(&self.project_id, "project_id")?,
            uploaded_by: parse_field(&self.uploaded_by, "uploaded_by")?,
            date_from: parse_date(&self.date_from, "date_from", false)?,
            date_to: parse_date(&self.date_to, "date_to", true)?,
            tag_ids,
            sort_by: parse_field(&self.sort_by, "sort_by")?,
            sort_order: parse_field(&self.sort_order, "sort_order")?.unwrap_or_default(),
        })
    }
}
