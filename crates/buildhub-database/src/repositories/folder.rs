//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use buildhub_core::error::{AppError, ErrorKind};
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::FolderId;
use buildhub_entity::folder::Folder;

use super::FolderRepository;

const FOLDER_COLUMNS: &str = "id, name, parent_id, path, created_at, updated_at";

/// PostgreSQL-backed folder storage.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn path_conflict(e: sqlx::Error, path: &str, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("document_folders_path_key") =>
        {
            AppError::conflict(format!("Folder path '{path}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}

#[async_trait]
impl Repository<Folder, FolderId> for PgFolderRepository {
    async fn find_by_id(&self, id: &FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM document_folders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM document_folders ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn create(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO document_folders (id, name, parent_id, path, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(&folder.path)
        .bind(folder.created_at)
        .bind(folder.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| path_conflict(e, &folder.path, "Failed to create folder"))
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE document_folders SET name = $2, parent_id = $3, path = $4, updated_at = $5 \
             WHERE id = $1 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(&folder.path)
        .bind(folder.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| path_conflict(e, &folder.path, "Failed to update folder"))?
        .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn delete(&self, id: &FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM document_folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM document_folders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count folders", e)
            })?;
        Ok(count as u64)
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM document_folders WHERE path = $1"
        ))
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find folder by path", e)
        })
    }

    async fn find_children(&self, parent_id: Option<&FolderId>) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM document_folders \
             WHERE parent_id IS NOT DISTINCT FROM $1 ORDER BY seq"
        ))
        .bind(parent_id.copied())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_descendants(&self, path: &str) -> AppResult<Vec<Folder>> {
        // `starts_with` avoids LIKE wildcards in user-chosen folder names.
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM document_folders \
             WHERE starts_with(path, $1 || '/') ORDER BY path"
        ))
        .bind(path)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    async fn count_children(&self, id: &FolderId) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM document_folders WHERE parent_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count children", e)
                })?;
        Ok(count as u64)
    }

    async fn update_many(&self, folders: &[Folder]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Park every path first so intermediate states cannot collide on
        // the unique path constraint.
        for folder in folders {
            sqlx::query("UPDATE document_folders SET path = id::text WHERE id = $1")
                .bind(folder.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update folder", e)
                })?;
        }

        for folder in folders {
            let result = sqlx::query(
                "UPDATE document_folders SET name = $2, parent_id = $3, path = $4, updated_at = $5 \
                 WHERE id = $1",
            )
            .bind(folder.id)
            .bind(&folder.name)
            .bind(folder.parent_id)
            .bind(&folder.path)
            .bind(folder.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| path_conflict(e, &folder.path, "Failed to update folder"))?;

            if result.rows_affected() == 0 {
                return Err(AppError::not_found("Folder not found"));
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder update", e)
        })?;
        Ok(())
    }
}
