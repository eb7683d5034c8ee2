//! Document version workflow: upload, list, and current version.

use std::sync::Arc;

use tracing::info;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::DocumentId;
use buildhub_database::repositories::DocumentRepository;
use buildhub_entity::document::{Document, DocumentVersion, FileUpload};

use super::service::validate_upload;
use crate::context::RequestContext;

/// Manages document version history.
///
/// History is append-only: a new upload becomes the current version and
/// older versions are kept, inactive.
#[derive(Clone)]
pub struct VersionService {
    /// Document repository.
    document_repo: Arc<dyn DocumentRepository>,
    /// Upload size limit in bytes.
    max_upload_size_bytes: u64,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(document_repo: Arc<dyn DocumentRepository>, max_upload_size_bytes: u64) -> Self {
        Self {
            document_repo,
            max_upload_size_bytes,
        }
    }

    /// Uploads a new version of a document and makes it current.
    pub async fn upload_new_version(
        &self,
        ctx: &RequestContext,
        document_id: &DocumentId,
        upload: FileUpload,
        change_log: Option<String>,
    ) -> AppResult<Document> {
        validate_upload(&upload, self.max_upload_size_bytes)?;
        let change_log = change_log.filter(|c| !c.trim().is_empty());

        let document = self
            .document_repo
            .append_version(
                document_id,
                &upload,
                change_log,
                ctx.user_id,
                ctx.request_time,
            )
            .await?;

        if let Some(current) = document.current_version() {
            info!(
                user_id = ctx.user_id,
                document_id = %document.id,
                version = %current.version,
                file_name = %current.file_name,
                "New document version uploaded"
            );
        }

        Ok(document)
    }

    /// Lists all versions of a document, oldest first.
    pub async fn list_versions(&self, document_id: &DocumentId) -> AppResult<Vec<DocumentVersion>> {
        let mut versions = self.load(document_id).await?.versions;
        versions.sort_by_key(|v| v.version);
        Ok(versions)
    }

    /// Returns the active version of a document.
    pub async fn current_version(&self, document_id: &DocumentId) -> AppResult<DocumentVersion> {
        self.load(document_id)
            .await?
            .current_version()
            .cloned()
            .ok_or_else(|| AppError::internal(format!("Document {document_id} has no active version")))
    }

    async fn load(&self, document_id: &DocumentId) -> AppResult<Document> {
        self.document_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }
}

#[cfg(test)]
mod tests {
    use buildhub_core::error::ErrorKind;
    use buildhub_database::memory::MemoryDocumentRepository;
    use buildhub_entity::document::DocumentOptions;

    use super::*;

    fn upload(name: &str, size: i64) -> FileUpload {
        FileUpload {
            file_name: name.to_string(),
            file_size: size,
            mime_type: None,
        }
    }

    async fn setup() -> (VersionService, Document, RequestContext) {
        let repo = Arc::new(MemoryDocumentRepository::new());
        let ctx = RequestContext::new(3);
        let doc = Document::new(
            &upload("bridge-deck.dwg", 4_096),
            &DocumentOptions::default(),
            Vec::new(),
            ctx.user_id,
            ctx.request_time,
        );
        repo.create(&doc).await.unwrap();
        (VersionService::new(repo, 10_000), doc, ctx)
    }

    #[tokio::test]
    async fn test_two_uploads_reach_one_point_two() {
        let (service, doc, ctx) = setup().await;

        service
            .upload_new_version(&ctx, &doc.id, upload("bridge-deck-r1.dwg", 5_000), None)
            .await
            .unwrap();
        let updated = service
            .upload_new_version(
                &ctx,
                &doc.id,
                upload("bridge-deck-r2.dwg", 6_000),
                Some("Revised expansion joints".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(updated.file_name, "bridge-deck-r2.dwg");
        assert_eq!(updated.file_size, 6_000);

        let versions = service.list_versions(&doc.id).await.unwrap();
        let numbers: Vec<String> = versions.iter().map(|v| v.version.to_string()).collect();
        assert_eq!(numbers, ["1.0", "1.1", "1.2"]);
        assert_eq!(versions.iter().filter(|v| v.is_active).count(), 1);

        let current = service.current_version(&doc.id).await.unwrap();
        assert_eq!(current.version.to_string(), "1.2");
        assert_eq!(current.change_log.as_deref(), Some("Revised expansion joints"));
    }

    #[tokio::test]
    async fn test_prior_versions_unchanged_except_flag() {
        let (service, doc, ctx) = setup().await;
        let before = service.list_versions(&doc.id).await.unwrap();

        service
            .upload_new_version(&ctx, &doc.id, upload("next.dwg", 1), None)
            .await
            .unwrap();

        let after = service.list_versions(&doc.id).await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        let mut first = after[0].clone();
        assert!(!first.is_active);
        first.is_active = true;
        assert_eq!(first, before[0]);
    }

    #[tokio::test]
    async fn test_missing_document_and_oversized_upload() {
        let (service, doc, ctx) = setup().await;

        let err = service
            .upload_new_version(&ctx, &DocumentId::new(), upload("x.pdf", 1), None)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Document not found");

        let err = service
            .upload_new_version(&ctx, &doc.id, upload("x.pdf", 10_001), None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(service.list_versions(&doc.id).await.unwrap().len(), 1);
    }
}
