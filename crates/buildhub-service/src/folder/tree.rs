//! Folder tree building.

use std::sync::Arc;

use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_database::repositories::{DocumentRepository, FolderRepository};
use buildhub_entity::folder::FolderTree;

/// Builds the nested folder view.
#[derive(Clone)]
pub struct TreeService {
    /// Folder repository.
    folder_repo: Arc<dyn FolderRepository>,
    /// Document repository, for per-folder counts.
    document_repo: Arc<dyn DocumentRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        folder_repo: Arc<dyn FolderRepository>,
        document_repo: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            folder_repo,
            document_repo,
        }
    }

    /// Builds the complete forest of folders with child and document counts.
    pub async fn tree(&self) -> AppResult<FolderTree> {
        let folders = self.folder_repo.find_all().await?;
        let counts = self.document_repo.count_by_folder().await?;
        Ok(FolderTree::build(&folders, &counts))
    }
}

#[cfg(test)]
mod tests {
    use buildhub_database::memory::{MemoryDocumentRepository, MemoryFolderRepository};
    use buildhub_entity::folder::Folder;
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn test_tree_nests_children() {
        let folders = Arc::new(MemoryFolderRepository::new());
        let now = Utc::now();
        let site = folders.create(&Folder::new("Site", None, now)).await.unwrap();
        folders
            .create(&Folder::new("Photos", Some(&site), now))
            .await
            .unwrap();
        folders
            .create(&Folder::new("Daily Logs", Some(&site), now))
            .await
            .unwrap();
        folders.create(&Folder::new("Admin", None, now)).await.unwrap();

        let service = TreeService::new(folders, Arc::new(MemoryDocumentRepository::new()));
        let tree = service.tree().await.unwrap();

        assert_eq!(tree.total_folders, 4);
        let roots: Vec<&str> = tree.roots.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(roots, ["Admin", "Site"]);
        let site_node = &tree.roots[1];
        assert_eq!(site_node.child_count, 2);
        assert_eq!(site_node.children[0].name, "Daily Logs");
        assert_eq!(site_node.children[1].path, "/Site/Photos");
    }
}
