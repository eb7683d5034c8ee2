//! Document CRUD and tagging.

use std::sync::Arc;

use tracing::info;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::{DocumentId, FolderId, TagId};
use buildhub_database::repositories::{DocumentRepository, FolderRepository, TagRepository};
use buildhub_entity::document::{
    Document, DocumentChange, DocumentOptions, FileUpload, UpdateDocument,
};
use buildhub_entity::tag::DocumentTag;

use super::search::DocumentFilter;
use crate::context::RequestContext;

/// Reject uploads without a name, with a negative size, or above `max_size`.
pub(crate) fn validate_upload(upload: &FileUpload, max_size: u64) -> AppResult<()> {
    if upload.file_name.trim().is_empty() {
        return Err(AppError::validation("File name cannot be empty"));
    }
    if upload.file_size < 0 {
        return Err(AppError::validation("File size cannot be negative"));
    }
    if upload.file_size as u64 > max_size {
        return Err(AppError::validation(format!(
            "File exceeds the maximum upload size of {max_size} bytes"
        )));
    }
    Ok(())
}

/// Manages documents and their tag sets.
#[derive(Clone)]
pub struct DocumentService {
    /// Document repository.
    document_repo: Arc<dyn DocumentRepository>,
    /// Folder repository, for folder existence checks.
    folder_repo: Arc<dyn FolderRepository>,
    /// Tag repository, for resolving tag ids.
    tag_repo: Arc<dyn TagRepository>,
    /// Upload size limit in bytes.
    max_upload_size_bytes: u64,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        tag_repo: Arc<dyn TagRepository>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            document_repo,
            folder_repo,
            tag_repo,
            max_upload_size_bytes,
        }
    }

    /// Lists documents matching `filter`.
    pub async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<Document>> {
        let documents = self.document_repo.find_all().await?;
        Ok(filter.apply(documents))
    }

    /// Gets a document by ID.
    pub async fn get(&self, id: &DocumentId) -> AppResult<Document> {
        self.document_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Creates a document from its first upload; the upload becomes version 1.0.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        upload: FileUpload,
        options: DocumentOptions,
    ) -> AppResult<Document> {
        validate_upload(&upload, self.max_upload_size_bytes)?;
        if let Some(folder_id) = &options.folder_id {
            self.ensure_folder(folder_id).await?;
        }
        let tags = self.resolve_tags(&options.tag_ids).await?;

        let document = Document::new(&upload, &options, tags, ctx.user_id, ctx.request_time);
        let document = self.document_repo.create(&document).await?;

        info!(
            user_id = ctx.user_id,
            document_id = %document.id,
            file_name = %document.file_name,
            file_type = %document.file_type,
            "Document created"
        );

        Ok(document)
    }

    /// Applies an update command. A tag list in the command replaces the
    /// current tag set.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        command: UpdateDocument,
    ) -> AppResult<Document> {
        if command
            .file_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if let Some(Some(folder_id)) = &command.folder_id {
            self.ensure_folder(folder_id).await?;
        }
        let tags = match &command.tag_ids {
            Some(tag_ids) => Some(self.resolve_tags(tag_ids).await?),
            None => None,
        };

        let change = DocumentChange::Update { command, tags };
        let document = self
            .document_repo
            .apply_change(id, &change, ctx.request_time)
            .await?;

        info!(
            user_id = ctx.user_id,
            document_id = %document.id,
            "Document updated"
        );

        Ok(document)
    }

    /// Deletes a document together with its versions.
    pub async fn delete(&self, ctx: &RequestContext, id: &DocumentId) -> AppResult<()> {
        if !self.document_repo.delete(id).await? {
            return Err(AppError::not_found("Document not found"));
        }

        info!(user_id = ctx.user_id, document_id = %id, "Document deleted");
        Ok(())
    }

    /// Attaches tags, keeping tags already present and their order.
    pub async fn add_tags(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        tag_ids: &[TagId],
    ) -> AppResult<Document> {
        let tags = self.resolve_tags(tag_ids).await?;
        let document = self
            .document_repo
            .apply_change(id, &DocumentChange::AddTags(tags), ctx.request_time)
            .await?;

        info!(
            user_id = ctx.user_id,
            document_id = %document.id,
            tag_count = document.tags.len(),
            "Tags added to document"
        );

        Ok(document)
    }

    /// Detaches tags. Ids that are not attached are ignored.
    pub async fn remove_tags(
        &self,
        ctx: &RequestContext,
        id: &DocumentId,
        tag_ids: &[TagId],
    ) -> AppResult<Document> {
        let change = DocumentChange::RemoveTags(tag_ids.to_vec());
        let document = self
            .document_repo
            .apply_change(id, &change, ctx.request_time)
            .await?;

        info!(
            user_id = ctx.user_id,
            document_id = %document.id,
            tag_count = document.tags.len(),
            "Tags removed from document"
        );

        Ok(document)
    }

    async fn ensure_folder(&self, folder_id: &FolderId) -> AppResult<()> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Look up tags by id, dropping duplicates. Every id must exist.
    async fn resolve_tags(&self, tag_ids: &[TagId]) -> AppResult<Vec<DocumentTag>> {
        let mut unique: Vec<TagId> = Vec::with_capacity(tag_ids.len());
        for id in tag_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        let tags = self.tag_repo.find_by_ids(&unique).await?;
        if tags.len() != unique.len() {
            return Err(AppError::not_found("Tag not found"));
        }
        Ok(tags)
    }
}
