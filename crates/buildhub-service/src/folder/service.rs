//! Folder CRUD with path maintenance and delete guards.

use std::sync::Arc;

use tracing::info;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::FolderId;
use buildhub_database::repositories::{DocumentRepository, FolderRepository};
use buildhub_entity::folder::{Folder, UpdateFolder};

use crate::context::RequestContext;

/// Manages folder CRUD operations.
#[derive(Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<dyn FolderRepository>,
    /// Document repository, for document counts and the delete guard.
    document_repo: Arc<dyn DocumentRepository>,
}

fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if name.contains('/') {
        return Err(AppError::validation("Folder name cannot contain '/'"));
    }
    Ok(name)
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<dyn FolderRepository>,
        document_repo: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            folder_repo,
            document_repo,
        }
    }

    /// Lists every folder with its document count, in creation order.
    pub async fn list(&self) -> AppResult<Vec<Folder>> {
        let counts = self.document_repo.count_by_folder().await?;
        let mut folders = self.folder_repo.find_all().await?;
        for folder in &mut folders {
            folder.document_count = Some(counts.get(&folder.id).copied().unwrap_or(0));
        }
        Ok(folders)
    }

    /// Gets a folder by ID, with its document count.
    pub async fn get(&self, id: &FolderId) -> AppResult<Folder> {
        let mut folder = self.find(id).await?;
        folder.document_count = Some(self.document_repo.count_in_folder(id).await?);
        Ok(folder)
    }

    /// Creates a folder at the root or below `parent_id`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<&FolderId>,
    ) -> AppResult<Folder> {
        let name = validate_name(name)?;

        let parent = match parent_id {
            Some(parent_id) => Some(self.find(parent_id).await?),
            None => None,
        };
        let folder = Folder::new(name, parent.as_ref(), ctx.request_time);
        self.ensure_path_free(&folder.path, &folder.id).await?;

        let mut folder = self.folder_repo.create(&folder).await?;
        folder.document_count = Some(0);

        info!(
            user_id = ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames and/or moves a folder. Paths below it follow.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &FolderId,
        command: UpdateFolder,
    ) -> AppResult<Folder> {
        let mut folder = self.find(id).await?;
        let old_path = folder.path.clone();

        if let Some(name) = &command.name {
            folder.name = validate_name(name)?.to_string();
        }

        if let Some(new_parent) = command.parent_id {
            folder.parent_id = match new_parent {
                Some(parent_id) if parent_id == folder.id => {
                    return Err(AppError::validation("Cannot move a folder into itself"));
                }
                Some(parent_id) => {
                    let parent = self.find(&parent_id).await?;
                    if parent.is_below(&old_path) {
                        return Err(AppError::validation(
                            "Cannot move a folder into one of its descendants",
                        ));
                    }
                    Some(parent_id)
                }
                None => None,
            };
        }

        let parent_path = match &folder.parent_id {
            Some(parent_id) => Some(self.find(parent_id).await?.path),
            None => None,
        };
        folder.path = Folder::child_path(parent_path.as_deref(), &folder.name);
        folder.updated_at = ctx.request_time;

        let mut changed = vec![folder.clone()];
        if folder.path != old_path {
            self.ensure_path_free(&folder.path, &folder.id).await?;
            for mut descendant in self.folder_repo.find_descendants(&old_path).await? {
                descendant.rebase_path(&old_path, &folder.path);
                changed.push(descendant);
            }
        }
        self.folder_repo.update_many(&changed).await?;

        info!(
            user_id = ctx.user_id,
            folder_id = %folder.id,
            old_path = %old_path,
            new_path = %folder.path,
            descendants = changed.len() - 1,
            "Folder updated"
        );

        folder.document_count = Some(self.document_repo.count_in_folder(id).await?);
        Ok(folder)
    }

    /// Deletes an empty folder.
    ///
    /// Fails while any document is filed in the folder or any folder has it
    /// as parent.
    pub async fn delete(&self, ctx: &RequestContext, id: &FolderId) -> AppResult<()> {
        let folder = self.find(id).await?;

        if self.document_repo.count_in_folder(id).await? > 0 {
            return Err(AppError::conflict("Cannot delete folder with documents"));
        }
        if self.folder_repo.count_children(id).await? > 0 {
            return Err(AppError::conflict("Cannot delete folder with subfolders"));
        }

        if !self.folder_repo.delete(id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        info!(
            user_id = ctx.user_id,
            folder_id = %id,
            path = %folder.path,
            "Folder deleted"
        );

        Ok(())
    }

    async fn find(&self, id: &FolderId) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn ensure_path_free(&self, path: &str, own_id: &FolderId) -> AppResult<()> {
        match self.folder_repo.find_by_path(path).await? {
            Some(existing) if existing.id != *own_id => Err(AppError::conflict(format!(
                "Folder '{path}' already exists"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use buildhub_core::error::ErrorKind;
    use buildhub_database::memory::{MemoryDocumentRepository, MemoryFolderRepository};
    use buildhub_entity::document::{Document, DocumentOptions, FileUpload};

    use super::*;

    fn setup() -> (FolderService, Arc<MemoryDocumentRepository>, RequestContext) {
        let documents = Arc::new(MemoryDocumentRepository::new());
        let service = FolderService::new(Arc::new(MemoryFolderRepository::new()), documents.clone());
        (service, documents, RequestContext::new(5))
    }

    async fn file_document(documents: &MemoryDocumentRepository, folder_id: FolderId) -> Document {
        let options = DocumentOptions {
            folder_id: Some(folder_id),
            ..Default::default()
        };
        let upload = FileUpload {
            file_name: "permit.pdf".to_string(),
            file_size: 10,
            mime_type: None,
        };
        documents
            .create(&Document::new(&upload, &options, Vec::new(), 1, chrono::Utc::now()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_guards_scenario() {
        let (service, _, ctx) = setup();
        let a = service.create(&ctx, "A", None).await.unwrap();
        let b = service.create(&ctx, "B", Some(&a.id)).await.unwrap();
        assert_eq!(a.path, "/A");
        assert_eq!(b.path, "/A/B");

        let err = service.delete(&ctx, &a.id).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(err.message, "Cannot delete folder with subfolders");

        service.delete(&ctx, &b.id).await.unwrap();
        service.delete(&ctx, &a.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_documents_block_delete_before_subfolders() {
        let (service, documents, ctx) = setup();
        let a = service.create(&ctx, "A", None).await.unwrap();
        service.create(&ctx, "B", Some(&a.id)).await.unwrap();
        file_document(&documents, a.id).await;

        let err = service.delete(&ctx, &a.id).await.unwrap_err();
        assert_eq!(err.message, "Cannot delete folder with documents");

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].document_count, Some(1));
        assert_eq!(listed[1].document_count, Some(0));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (service, _, ctx) = setup();
        assert!(service.create(&ctx, " ", None).await.unwrap_err().is(ErrorKind::Validation));
        assert!(service.create(&ctx, "a/b", None).await.unwrap_err().is(ErrorKind::Validation));

        let err = service
            .create(&ctx, "Orphan", Some(&FolderId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Folder not found");

        service.create(&ctx, "Permits", None).await.unwrap();
        let err = service.create(&ctx, "Permits", None).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_rename_rewrites_descendant_paths() {
        let (service, _, ctx) = setup();
        let projects = service.create(&ctx, "Projects", None).await.unwrap();
        let harbor = service.create(&ctx, "Harbor", Some(&projects.id)).await.unwrap();
        let plans = service.create(&ctx, "Plans", Some(&harbor.id)).await.unwrap();

        let command = UpdateFolder {
            name: Some("Active Projects".to_string()),
            parent_id: None,
        };
        let renamed = service.update(&ctx, &projects.id, command).await.unwrap();
        assert_eq!(renamed.path, "/Active Projects");

        assert_eq!(
            service.get(&harbor.id).await.unwrap().path,
            "/Active Projects/Harbor"
        );
        assert_eq!(
            service.get(&plans.id).await.unwrap().path,
            "/Active Projects/Harbor/Plans"
        );
    }

    #[tokio::test]
    async fn test_move_and_cycle_rejection() {
        let (service, _, ctx) = setup();
        let a = service.create(&ctx, "A", None).await.unwrap();
        let b = service.create(&ctx, "B", Some(&a.id)).await.unwrap();
        let c = service.create(&ctx, "C", None).await.unwrap();

        let into_child = UpdateFolder {
            name: None,
            parent_id: Some(Some(b.id)),
        };
        let err = service.update(&ctx, &a.id, into_child).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let into_self = UpdateFolder {
            name: None,
            parent_id: Some(Some(a.id)),
        };
        assert!(service.update(&ctx, &a.id, into_self).await.is_err());

        let under_c = UpdateFolder {
            name: None,
            parent_id: Some(Some(c.id)),
        };
        let moved = service.update(&ctx, &a.id, under_c).await.unwrap();
        assert_eq!(moved.path, "/C/A");
        assert_eq!(service.get(&b.id).await.unwrap().path, "/C/A/B");

        let to_root = UpdateFolder {
            name: None,
            parent_id: Some(None),
        };
        let moved = service.update(&ctx, &b.id, to_root).await.unwrap();
        assert_eq!(moved.path, "/B");
        assert!(moved.parent_id.is_none());
    }
}
