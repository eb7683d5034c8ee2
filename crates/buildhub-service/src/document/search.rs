//! Document filtering and sorting.
//!
//! Filters are applied in a fixed order (text search, equality filters,
//! date range, tags) and the optional sort is stable, so documents with
//! equal keys keep their filtered order.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buildhub_core::types::{FolderId, ProjectId, SortDirection, TagId};
use buildhub_entity::document::{Document, DocumentCategory, DocumentStatus, FileType};

/// Key a document list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Display file name, case-insensitive.
    Name,
    /// Creation time.
    UploadedAt,
    /// Size in bytes.
    FileSize,
    /// Business category name.
    Category,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "file_name" => Ok(Self::Name),
            "uploaded_at" | "date" => Ok(Self::UploadedAt),
            "file_size" | "size" => Ok(Self::FileSize),
            "category" => Ok(Self::Category),
            other => Err(format!("Unknown sort key '{other}'")),
        }
    }
}

impl SortKey {
    fn compare(self, a: &Document, b: &Document) -> Ordering {
        match self {
            Self::Name => a
                .file_name
                .to_lowercase()
                .cmp(&b.file_name.to_lowercase()),
            Self::UploadedAt => a.uploaded_at.cmp(&b.uploaded_at),
            Self::FileSize => a.file_size.cmp(&b.file_size),
            Self::Category => a.category.as_str().cmp(b.category.as_str()),
        }
    }
}

/// Criteria for listing documents. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    /// Case-insensitive substring of file name, original name, or description.
    pub search: Option<String>,
    pub category: Option<DocumentCategory>,
    pub file_type: Option<FileType>,
    pub status: Option<DocumentStatus>,
    pub folder_id: Option<FolderId>,
    pub project_id: Option<ProjectId>,
    pub uploaded_by: Option<i64>,
    /// Inclusive lower bound on `uploaded_at`.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `uploaded_at`.
    pub date_to: Option<DateTime<Utc>>,
    /// Keep documents carrying at least one of these tags.
    pub tag_ids: Vec<TagId>,
    pub sort_by: Option<SortKey>,
    pub sort_order: SortDirection,
}

impl DocumentFilter {
    /// Whether `document` passes every filter.
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = document.file_name.to_lowercase().contains(&needle)
                || document.original_name.to_lowercase().contains(&needle)
                || document
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if self.category.is_some_and(|c| c != document.category)
            || self.file_type.is_some_and(|t| t != document.file_type)
            || self.status.is_some_and(|s| s != document.status)
            || self.folder_id.is_some_and(|f| Some(f) != document.folder_id)
            || self.project_id.is_some_and(|p| Some(p) != document.project_id)
            || self.uploaded_by.is_some_and(|u| u != document.uploaded_by)
        {
            return false;
        }

        if self.date_from.is_some_and(|from| document.uploaded_at < from)
            || self.date_to.is_some_and(|to| document.uploaded_at > to)
        {
            return false;
        }

        self.tag_ids.is_empty() || document.has_any_tag(&self.tag_ids)
    }

    /// Filter `documents` and apply the optional sort.
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut result: Vec<Document> = documents.into_iter().filter(|d| self.matches(d)).collect();
        if let Some(key) = self.sort_by {
            // `sort_by` is stable.
            result.sort_by(|a, b| self.sort_order.apply(key.compare(a, b)));
        }
        result
    }
}
