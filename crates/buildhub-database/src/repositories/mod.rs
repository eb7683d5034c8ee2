//! Repository contracts and their PostgreSQL implementations.
//!
//! Each store extends the generic [`Repository`] trait with the queries the
//! services need. Services hold these as `Arc<dyn …>` so the PostgreSQL and
//! in-memory implementations are interchangeable.

pub mod document;
pub mod folder;
pub mod tag;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::{DocumentId, FolderId, TagId};
use buildhub_entity::document::{Document, DocumentChange, FileUpload};
use buildhub_entity::folder::Folder;
use buildhub_entity::tag::DocumentTag;

pub use document::PgDocumentRepository;
pub use folder::PgFolderRepository;
pub use tag::PgTagRepository;

/// Storage for document aggregates (document, versions, tag links).
///
/// `update` overwrites metadata and the tag set from a full snapshot.
/// Edits made on behalf of a request go through
/// [`DocumentRepository::apply_change`] instead, which reads the stored
/// document under the same lock as version uploads. The version history
/// changes exclusively through [`DocumentRepository::append_version`].
#[async_trait]
pub trait DocumentRepository: Repository<Document, DocumentId> {
    /// Append a version to the stored document and make it current.
    ///
    /// Reading the latest number, deactivating the previous versions, and
    /// inserting the new one happen as one atomic step, so concurrent
    /// uploads to the same document get distinct numbers.
    async fn append_version(
        &self,
        id: &DocumentId,
        upload: &FileUpload,
        change_log: Option<String>,
        uploaded_by: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Document>;

    /// Apply `change` to the stored document and persist the result.
    ///
    /// The read, the change, and the write are one atomic step with respect
    /// to [`DocumentRepository::append_version`], so an edit never rolls
    /// back the file name or size of a concurrently uploaded version.
    async fn apply_change(
        &self,
        id: &DocumentId,
        change: &DocumentChange,
        now: DateTime<Utc>,
    ) -> AppResult<Document>;

    /// Number of documents filed directly in `folder_id`.
    async fn count_in_folder(&self, folder_id: &FolderId) -> AppResult<u64>;

    /// Document counts keyed by folder, for folders holding any documents.
    async fn count_by_folder(&self) -> AppResult<HashMap<FolderId, u64>>;
}

/// Storage for the folder hierarchy.
#[async_trait]
pub trait FolderRepository: Repository<Folder, FolderId> {
    /// Find a folder by its full path.
    async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>>;

    /// Direct children of `parent_id`, or root folders for `None`.
    async fn find_children(&self, parent_id: Option<&FolderId>) -> AppResult<Vec<Folder>>;

    /// Every folder whose path lies below `path`.
    async fn find_descendants(&self, path: &str) -> AppResult<Vec<Folder>>;

    /// Number of direct subfolders.
    async fn count_children(&self, id: &FolderId) -> AppResult<u64>;

    /// Persist several folders in one atomic step (rename or move of a
    /// subtree).
    async fn update_many(&self, folders: &[Folder]) -> AppResult<()>;
}

/// Storage for document tags.
#[async_trait]
pub trait TagRepository: Repository<DocumentTag, TagId> {
    /// Find a tag by name, ignoring case.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<DocumentTag>>;

    /// Tags with the given ids, in the order requested. Unknown ids are
    /// skipped.
    async fn find_by_ids(&self, ids: &[TagId]) -> AppResult<Vec<DocumentTag>>;
}
