use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::TagId;
use buildhub_entity::tag::DocumentTag;

use crate::repositories::TagRepository;

/// Case-insensitive name comparison, matching `lower(name)` in PostgreSQL.
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Tag storage backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryTagRepository {
    tags: Arc<RwLock<Vec<DocumentTag>>>,
}

impl MemoryTagRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<DocumentTag, TagId> for MemoryTagRepository {
    async fn find_by_id(&self, id: &TagId) -> AppResult<Option<DocumentTag>> {
        Ok(self.tags.read().await.iter().find(|t| t.id == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<DocumentTag>> {
        Ok(self.tags.read().await.clone())
    }

    async fn create(&self, tag: &DocumentTag) -> AppResult<DocumentTag> {
        let mut tags = self.tags.write().await;
        if tags.iter().any(|t| same_name(&t.name, &tag.name)) {
            return Err(AppError::conflict(format!("Tag '{}' already exists", tag.name)));
        }
        tags.push(tag.clone());
        Ok(tag.clone())
    }

    async fn update(&self, tag: &DocumentTag) -> AppResult<DocumentTag> {
        let mut tags = self.tags.write().await;
        if tags
            .iter()
            .any(|t| t.id != tag.id && same_name(&t.name, &tag.name))
        {
            return Err(AppError::conflict(format!("Tag '{}' already exists", tag.name)));
        }
        let slot = tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or_else(|| AppError::not_found("Tag not found"))?;
        *slot = tag.clone();
        Ok(tag.clone())
    }

    async fn delete(&self, id: &TagId) -> AppResult<bool> {
        let mut tags = self.tags.write().await;
        let before = tags.len();
        tags.retain(|t| t.id != *id);
        Ok(tags.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tags.read().await.len() as u64)
    }
}

#[async_trait]
impl TagRepository for MemoryTagRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<DocumentTag>> {
        Ok(self
            .tags
            .read()
            .await
            .iter()
            .find(|t| same_name(&t.name, name))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[TagId]) -> AppResult<Vec<DocumentTag>> {
        let tags = self.tags.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tags.iter().find(|t| t.id == *id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildhub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_duplicate_name_ignores_case() {
        let repo = MemoryTagRepository::new();
        repo.create(&DocumentTag::new("Urgent", "#FF0000")).await.unwrap();

        let err = repo
            .create(&DocumentTag::new("urgent", "#00FF00"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_name_matching_folds_non_ascii_case() {
        let repo = MemoryTagRepository::new();
        let tag = repo.create(&DocumentTag::new("Été", "#FFAA00")).await.unwrap();

        let found = repo.find_by_name("ÉTÉ").await.unwrap();
        assert_eq!(found, Some(tag));

        let err = repo
            .create(&DocumentTag::new("été", "#00AAFF"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_conflicts() {
        let repo = MemoryTagRepository::new();
        repo.create(&DocumentTag::new("Urgent", "#FF0000")).await.unwrap();
        let mut other = repo.create(&DocumentTag::new("Review", "#0000FF")).await.unwrap();

        other.name = "URGENT".to_string();
        let err = repo.update(&other).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        other.name = "review".to_string();
        assert_eq!(repo.update(&other).await.unwrap().name, "review");
    }

    #[tokio::test]
    async fn test_find_by_ids_keeps_requested_order() {
        let repo = MemoryTagRepository::new();
        let a = repo.create(&DocumentTag::new("A", "#111111")).await.unwrap();
        let b = repo.create(&DocumentTag::new("B", "#222222")).await.unwrap();

        let found = repo.find_by_ids(&[b.id, TagId::new(), a.id]).await.unwrap();
        assert_eq!(found, vec![b, a]);
    }
}
