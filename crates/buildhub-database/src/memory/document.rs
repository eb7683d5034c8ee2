use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::{DocumentId, FolderId};
use buildhub_entity::document::{Document, DocumentChange, FileUpload};

use crate::repositories::DocumentRepository;

/// Document storage backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentRepository {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl MemoryDocumentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Document, DocumentId> for MemoryDocumentRepository {
    async fn find_by_id(&self, id: &DocumentId) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .find(|d| d.id == *id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        Ok(self.documents.read().await.clone())
    }

    async fn create(&self, document: &Document) -> AppResult<Document> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(AppError::conflict("Document already exists"));
        }
        documents.push(document.clone());
        Ok(document.clone())
    }

    async fn update(&self, document: &Document) -> AppResult<Document> {
        let mut documents = self.documents.write().await;
        let stored = documents
            .iter_mut()
            .find(|d| d.id == document.id)
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        // Versions only change through `append_version`.
        let versions = std::mem::take(&mut stored.versions);
        let file_size = stored.file_size;
        *stored = Document {
            versions,
            file_size,
            ..document.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &DocumentId) -> AppResult<bool> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| d.id != *id);
        Ok(documents.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.documents.read().await.len() as u64)
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn append_version(
        &self,
        id: &DocumentId,
        upload: &FileUpload,
        change_log: Option<String>,
        uploaded_by: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Document> {
        let mut documents = self.documents.write().await;
        let document = documents
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or_else(|| AppError::not_found("Document not found"))?;
        document.push_version(upload, change_log, uploaded_by, now);
        Ok(document.clone())
    }

    async fn apply_change(
        &self,
        id: &DocumentId,
        change: &DocumentChange,
        now: DateTime<Utc>,
    ) -> AppResult<Document> {
        let mut documents = self.documents.write().await;
        let document = documents
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or_else(|| AppError::not_found("Document not found"))?;
        document.apply_change(change, now);
        Ok(document.clone())
    }

    async fn count_in_folder(&self, folder_id: &FolderId) -> AppResult<u64> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|d| d.folder_id == Some(*folder_id))
            .count() as u64)
    }

    async fn count_by_folder(&self) -> AppResult<HashMap<FolderId, u64>> {
        let mut counts = HashMap::new();
        for folder_id in self.documents.read().await.iter().filter_map(|d| d.folder_id) {
            *counts.entry(folder_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
