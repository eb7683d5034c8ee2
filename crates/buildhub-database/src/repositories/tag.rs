//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use buildhub_core::error::{AppError, ErrorKind};
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::TagId;
use buildhub_entity::tag::DocumentTag;

use super::TagRepository;

/// PostgreSQL-backed tag storage.
#[derive(Debug, Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<DocumentTag, TagId> for PgTagRepository {
    async fn find_by_id(&self, id: &TagId) -> AppResult<Option<DocumentTag>> {
        sqlx::query_as::<_, DocumentTag>("SELECT id, name, color FROM document_tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    async fn find_all(&self) -> AppResult<Vec<DocumentTag>> {
        sqlx::query_as::<_, DocumentTag>("SELECT id, name, color FROM document_tags ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    async fn create(&self, tag: &DocumentTag) -> AppResult<DocumentTag> {
        sqlx::query_as::<_, DocumentTag>(
            "INSERT INTO document_tags (id, name, color) VALUES ($1, $2, $3) \
             RETURNING id, name, color",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .bind(&tag.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("document_tags_name_key") =>
            {
                AppError::conflict(format!("Tag '{}' already exists", tag.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create tag", e),
        })
    }

    async fn update(&self, tag: &DocumentTag) -> AppResult<DocumentTag> {
        sqlx::query_as::<_, DocumentTag>(
            "UPDATE document_tags SET name = $2, color = $3 WHERE id = $1 \
             RETURNING id, name, color",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .bind(&tag.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tag", e))?
        .ok_or_else(|| AppError::not_found("Tag not found"))
    }

    async fn delete(&self, id: &TagId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM document_tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM document_tags")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tags", e))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<DocumentTag>> {
        sqlx::query_as::<_, DocumentTag>(
            "SELECT id, name, color FROM document_tags WHERE lower(name) = lower($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag by name", e))
    }

    async fn find_by_ids(&self, ids: &[TagId]) -> AppResult<Vec<DocumentTag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let found = sqlx::query_as::<_, DocumentTag>(
            "SELECT id, name, color FROM document_tags WHERE id = ANY($1)",
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tags", e))?;

        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|t| t.id == *id).cloned())
            .collect())
    }
}
