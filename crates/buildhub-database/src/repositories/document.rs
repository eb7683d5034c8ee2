//! Document repository implementation.
//!
//! A document is stored across `documents`, `document_versions`, and
//! `document_tag_links`; every write that touches more than one table runs
//! in a transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use buildhub_core::error::{AppError, ErrorKind};
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_core::types::{DocumentId, DocumentVersionId, FolderId, ProjectId, TagId};
use buildhub_entity::document::{
    Document, DocumentChange, DocumentVersion, FileUpload, VersionNumber,
};
use buildhub_entity::tag::DocumentTag;

use super::DocumentRepository;

const DOCUMENT_COLUMNS: &str = "id, file_name, original_name, file_size, file_type, mime_type, \
     category, status, description, folder_id, project_id, uploaded_by, uploaded_at, updated_at";

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: DocumentId,
    file_name: String,
    original_name: String,
    file_size: i64,
    file_type: String,
    mime_type: String,
    category: String,
    status: String,
    description: Option<String>,
    folder_id: Option<FolderId>,
    project_id: Option<ProjectId>,
    uploaded_by: i64,
    uploaded_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct VersionRow {
    id: DocumentVersionId,
    document_id: DocumentId,
    version_tenths: i32,
    file_name: String,
    file_size: i64,
    uploaded_by: i64,
    uploaded_at: DateTime<Utc>,
    change_log: Option<String>,
    is_active: bool,
}

#[derive(Debug, FromRow)]
struct TagLinkRow {
    document_id: DocumentId,
    id: TagId,
    name: String,
    color: String,
}

impl VersionRow {
    fn into_version(self) -> AppResult<DocumentVersion> {
        let tenths = u32::try_from(self.version_tenths)
            .map_err(|_| AppError::database(format!("Invalid stored version for {}", self.id)))?;
        Ok(DocumentVersion {
            id: self.id,
            document_id: self.document_id,
            version: VersionNumber::from_tenths(tenths),
            file_name: self.file_name,
            file_size: self.file_size,
            uploaded_by: self.uploaded_by,
            uploaded_at: self.uploaded_at,
            change_log: self.change_log,
            is_active: self.is_active,
        })
    }
}

impl DocumentRow {
    fn into_document(
        self,
        versions: Vec<DocumentVersion>,
        tags: Vec<DocumentTag>,
    ) -> AppResult<Document> {
        let mut document = Document {
            id: self.id,
            file_name: self.file_name,
            original_name: self.original_name,
            file_size: self.file_size,
            file_type: self.file_type.parse().map_err(AppError::database)?,
            mime_type: self.mime_type,
            category: self.category.parse().map_err(AppError::database)?,
            status: self.status.parse().map_err(AppError::database)?,
            description: self.description,
            folder_id: self.folder_id,
            project_id: self.project_id,
            uploaded_by: self.uploaded_by,
            uploaded_at: self.uploaded_at,
            updated_at: self.updated_at,
            tags,
            versions,
            download_url: String::new(),
            preview_url: None,
            thumbnail_url: None,
        };
        document.refresh_urls();
        Ok(document)
    }
}

/// Load versions and tags for the given rows and assemble the aggregates,
/// preserving row order.
async fn assemble(conn: &mut PgConnection, rows: Vec<DocumentRow>) -> AppResult<Vec<Document>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id.into_uuid()).collect();

    let version_rows = sqlx::query_as::<_, VersionRow>(
        "SELECT id, document_id, version_tenths, file_name, file_size, uploaded_by, \
         uploaded_at, change_log, is_active \
         FROM document_versions WHERE document_id = ANY($1) \
         ORDER BY document_id, version_tenths",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load versions", e))?;

    let tag_rows = sqlx::query_as::<_, TagLinkRow>(
        "SELECT l.document_id, t.id, t.name, t.color \
         FROM document_tag_links l JOIN document_tags t ON t.id = l.tag_id \
         WHERE l.document_id = ANY($1) ORDER BY l.document_id, l.position",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load document tags", e))?;

    let mut versions: HashMap<DocumentId, Vec<DocumentVersion>> = HashMap::new();
    for row in version_rows {
        versions
            .entry(row.document_id)
            .or_default()
            .push(row.into_version()?);
    }

    let mut tags: HashMap<DocumentId, Vec<DocumentTag>> = HashMap::new();
    for row in tag_rows {
        tags.entry(row.document_id).or_default().push(DocumentTag {
            id: row.id,
            name: row.name,
            color: row.color,
        });
    }

    rows.into_iter()
        .map(|row| {
            let id = row.id;
            row.into_document(
                versions.remove(&id).unwrap_or_default(),
                tags.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}

async fn insert_version(conn: &mut PgConnection, version: &DocumentVersion) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO document_versions \
         (id, document_id, version_tenths, file_name, file_size, uploaded_by, uploaded_at, \
          change_log, is_active) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(version.id)
    .bind(version.document_id)
    .bind(version.version.tenths() as i32)
    .bind(&version.file_name)
    .bind(version.file_size)
    .bind(version.uploaded_by)
    .bind(version.uploaded_at)
    .bind(&version.change_log)
    .bind(version.is_active)
    .execute(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("document_versions_number_key") =>
        {
            AppError::conflict(format!("Version {} already exists", version.version))
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to insert version", e),
    })?;
    Ok(())
}

async fn replace_tag_links(conn: &mut PgConnection, document: &Document) -> AppResult<()> {
    sqlx::query("DELETE FROM document_tag_links WHERE document_id = $1")
        .bind(document.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear tag links", e))?;

    for (position, tag) in document.tags.iter().enumerate() {
        sqlx::query(
            "INSERT INTO document_tag_links (document_id, tag_id, position) VALUES ($1, $2, $3)",
        )
        .bind(document.id)
        .bind(tag.id)
        .bind(position as i32)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link tag", e))?;
    }
    Ok(())
}

/// Load a document with its row locked until the transaction ends.
async fn lock_document(conn: &mut PgConnection, id: &DocumentId) -> AppResult<Document> {
    let row = sqlx::query_as::<_, DocumentRow>(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock document", e))?
    .ok_or_else(|| AppError::not_found("Document not found"))?;

    assemble(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| AppError::not_found("Document not found"))
}

/// Write the editable metadata columns. Returns the affected row count.
async fn write_metadata(conn: &mut PgConnection, document: &Document) -> AppResult<u64> {
    let result = sqlx::query(
        "UPDATE documents SET file_name = $2, category = $3, status = $4, description = $5, \
         folder_id = $6, project_id = $7, updated_at = $8 WHERE id = $1",
    )
    .bind(document.id)
    .bind(&document.file_name)
    .bind(document.category.as_str())
    .bind(document.status.as_str())
    .bind(&document.description)
    .bind(document.folder_id)
    .bind(document.project_id)
    .bind(document.updated_at)
    .execute(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?;
    Ok(result.rows_affected())
}

fn tx_error(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Document transaction failed", e)
}

/// PostgreSQL-backed document storage.
#[derive(Debug, Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn acquire(&self) -> AppResult<sqlx::pool::PoolConnection<sqlx::Postgres>> {
        self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })
    }
}

#[async_trait]
impl Repository<Document, DocumentId> for PgDocumentRepository {
    async fn find_by_id(&self, id: &DocumentId) -> AppResult<Option<Document>> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))?;

        match row {
            Some(row) => Ok(assemble(&mut conn, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY seq"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;
        assemble(&mut conn, rows).await
    }

    async fn create(&self, document: &Document) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        sqlx::query(
            "INSERT INTO documents \
             (id, file_name, original_name, file_size, file_type, mime_type, category, status, \
              description, folder_id, project_id, uploaded_by, uploaded_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(document.id)
        .bind(&document.file_name)
        .bind(&document.original_name)
        .bind(document.file_size)
        .bind(document.file_type.as_str())
        .bind(&document.mime_type)
        .bind(document.category.as_str())
        .bind(document.status.as_str())
        .bind(&document.description)
        .bind(document.folder_id)
        .bind(document.project_id)
        .bind(document.uploaded_by)
        .bind(document.uploaded_at)
        .bind(document.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))?;

        for version in &document.versions {
            insert_version(&mut tx, version).await?;
        }
        replace_tag_links(&mut tx, document).await?;

        tx.commit().await.map_err(tx_error)?;
        Ok(document.clone())
    }

    async fn update(&self, document: &Document) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        if write_metadata(&mut tx, document).await? == 0 {
            return Err(AppError::not_found("Document not found"));
        }
        replace_tag_links(&mut tx, document).await?;

        tx.commit().await.map_err(tx_error)?;
        Ok(document.clone())
    }

    async fn delete(&self, id: &DocumentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })?;
        Ok(count as u64)
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn append_version(
        &self,
        id: &DocumentId,
        upload: &FileUpload,
        change_log: Option<String>,
        uploaded_by: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        // The row lock serializes concurrent uploads to the same document.
        let mut document = lock_document(&mut tx, id).await?;

        let version = document
            .push_version(upload, change_log, uploaded_by, now)
            .clone();

        sqlx::query("UPDATE document_versions SET is_active = FALSE WHERE document_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to deactivate versions", e)
            })?;

        insert_version(&mut tx, &version).await?;

        sqlx::query(
            "UPDATE documents SET file_name = $2, file_size = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&document.file_name)
        .bind(document.file_size)
        .bind(document.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?;

        tx.commit().await.map_err(tx_error)?;
        Ok(document)
    }

    async fn apply_change(
        &self,
        id: &DocumentId,
        change: &DocumentChange,
        now: DateTime<Utc>,
    ) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        let mut document = lock_document(&mut tx, id).await?;
        document.apply_change(change, now);

        write_metadata(&mut tx, &document).await?;
        replace_tag_links(&mut tx, &document).await?;

        tx.commit().await.map_err(tx_error)?;
        Ok(document)
    }

    async fn count_in_folder(&self, folder_id: &FolderId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })?;
        Ok(count as u64)
    }

    async fn count_by_folder(&self) -> AppResult<HashMap<FolderId, u64>> {
        let rows: Vec<(FolderId, i64)> = sqlx::query_as(
            "SELECT folder_id, COUNT(*) FROM documents \
             WHERE folder_id IS NOT NULL GROUP BY folder_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))?;

        Ok(rows
            .into_iter()
            .map(|(folder_id, count)| (folder_id, count as u64))
            .collect())
    }
}
