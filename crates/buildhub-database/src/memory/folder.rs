use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::FolderId;
use buildhub_entity::folder::Folder;

use crate::repositories::FolderRepository;

/// Folder storage backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryFolderRepository {
    folders: Arc<RwLock<Vec<Folder>>>,
}

impl MemoryFolderRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn path_taken(folders: &[Folder], path: &str, except: &FolderId) -> bool {
    folders.iter().any(|f| f.path == path && f.id != *except)
}

#[async_trait]
impl Repository<Folder, FolderId> for MemoryFolderRepository {
    async fn find_by_id(&self, id: &FolderId) -> AppResult<Option<Folder>> {
        Ok(self.folders.read().await.iter().find(|f| f.id == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        Ok(self.folders.read().await.clone())
    }

    async fn create(&self, folder: &Folder) -> AppResult<Folder> {
        let mut folders = self.folders.write().await;
        if path_taken(&folders, &folder.path, &folder.id) {
            return Err(AppError::conflict(format!(
                "Folder path '{}' already exists",
                folder.path
            )));
        }
        let mut stored = folder.clone();
        stored.document_count = None;
        folders.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        self.update_many(std::slice::from_ref(folder)).await?;
        let mut stored = folder.clone();
        stored.document_count = None;
        Ok(stored)
    }

    async fn delete(&self, id: &FolderId) -> AppResult<bool> {
        let mut folders = self.folders.write().await;
        let before = folders.len();
        folders.retain(|f| f.id != *id);
        Ok(folders.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.folders.read().await.len() as u64)
    }
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .read()
            .await
            .iter()
            .find(|f| f.path == path)
            .cloned())
    }

    async fn find_children(&self, parent_id: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        Ok(self
            .folders
            .read()
            .await
            .iter()
            .filter(|f| f.parent_id.as_ref() == parent_id)
            .cloned()
            .collect())
    }

    async fn find_descendants(&self, path: &str) -> AppResult<Vec<Folder>> {
        let mut found: Vec<Folder> = self
            .folders
            .read()
            .await
            .iter()
            .filter(|f| f.is_below(path))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(found)
    }

    async fn count_children(&self, id: &FolderId) -> AppResult<u64> {
        Ok(self
            .folders
            .read()
            .await
            .iter()
            .filter(|f| f.parent_id == Some(*id))
            .count() as u64)
    }

    async fn update_many(&self, updates: &[Folder]) -> AppResult<()> {
        let mut folders = self.folders.write().await;

        // Validate against the post-update state before touching anything.
        let mut next = folders.clone();
        for update in updates {
            let slot = next
                .iter_mut()
                .find(|f| f.id == update.id)
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            *slot = Folder {
                document_count: None,
                ..update.clone()
            };
        }
        for update in updates {
            if path_taken(&next, &update.path, &update.id) {
                return Err(AppError::conflict(format!(
                    "Folder path '{}' already exists",
                    update.path
                )));
            }
        }

        *folders = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildhub_core::error::ErrorKind;
    use chrono::Utc;

    #[tokio::test]
    async fn test_children_and_descendants() {
        let repo = MemoryFolderRepository::new();
        let now = Utc::now();
        let projects = repo.create(&Folder::new("Projects", None, now)).await.unwrap();
        let harbor = repo
            .create(&Folder::new("Harbor", Some(&projects), now))
            .await
            .unwrap();
        repo.create(&Folder::new("Plans", Some(&harbor), now))
            .await
            .unwrap();
        repo.create(&Folder::new("Projects2", None, now)).await.unwrap();

        let roots = repo.find_children(None).await.unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(repo.count_children(&projects.id).await.unwrap(), 1);

        let below: Vec<String> = repo
            .find_descendants("/Projects")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(below, ["/Projects/Harbor", "/Projects/Harbor/Plans"]);
    }

    #[tokio::test]
    async fn test_duplicate_path_conflicts() {
        let repo = MemoryFolderRepository::new();
        let now = Utc::now();
        repo.create(&Folder::new("Contracts", None, now)).await.unwrap();
        let err = repo
            .create(&Folder::new("Contracts", None, now))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_update_many_is_all_or_nothing() {
        let repo = MemoryFolderRepository::new();
        let now = Utc::now();
        let a = repo.create(&Folder::new("A", None, now)).await.unwrap();
        let b = repo.create(&Folder::new("B", None, now)).await.unwrap();

        let mut renamed = a.clone();
        renamed.name = "C".to_string();
        renamed.path = "/C".to_string();
        let mut clash = b.clone();
        clash.path = "/C".to_string();

        assert!(repo.update_many(&[renamed, clash]).await.is_err());
        assert_eq!(repo.find_by_id(&a.id).await.unwrap().unwrap().path, "/A");
        assert_eq!(repo.find_by_id(&b.id).await.unwrap().unwrap().path, "/B");
    }
}
